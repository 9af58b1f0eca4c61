fn main() -> Result<(), Box<dyn std::error::Error>> {
    // The gateway only calls the authentication service
    tonic_build::configure()
        .build_server(false)
        .build_client(true)
        .compile_protos(
            &["../../api/proto/auth/v1/authentication.proto"],
            &["../../api/proto"],
        )?;

    Ok(())
}
