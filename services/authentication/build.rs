fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Server for this service, client for in-process end-to-end tests
    tonic_build::configure()
        .build_server(true)
        .build_client(true)
        .compile_protos(
            &["../../api/proto/auth/v1/authentication.proto"],
            &["../../api/proto"],
        )?;

    Ok(())
}
