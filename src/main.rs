use actix_cors::Cors;
use actix_web::http::header;
use actix_web::{middleware, web, App, HttpServer};
use log::{info, warn};
use rustls::ServerConfig;
use rustls_pemfile::{certs, pkcs8_private_keys};
use std::env;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use git2doc::config::AppConfig;
use git2doc::github::GithubClient;
use git2doc::handlers;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    // Initialize env_logger. Override the log level with the RUST_LOG
    // environment variable, e.g. `RUST_LOG=debug cargo run`.
    env::set_var("RUST_LOG", env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()));
    env_logger::init();

    let app_config = AppConfig::from_env();
    let port = app_config.port;
    let addr = format!("0.0.0.0:{}", port);

    let github_client = GithubClient::new()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;

    let config_data = web::Data::new(app_config);
    let github_data = web::Data::new(github_client);

    info!("Server running at http://{}", addr);

    let mut http_server = HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allowed_methods(vec!["GET", "POST"])
            .allowed_headers(vec![header::ACCEPT, header::CONTENT_TYPE])
            .max_age(3600);

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(config_data.clone())
            .app_data(github_data.clone())
            .service(handlers::index)
            .service(handlers::fetch_metadata)
            .service(handlers::fetch_tree)
            .service(handlers::generate_readme)
            .service(handlers::generate_custom_readme)
    });

    if let (Ok(cert_path), Ok(key_path)) = (env::var("CERT_PATH"), env::var("KEY_PATH")) {
        if !Path::new(&cert_path).exists() || !Path::new(&key_path).exists() {
            warn!("CERT_PATH or KEY_PATH points to a non-existent file. Starting without HTTPS.");
            http_server = http_server.bind(addr)?;
        } else {
            info!("Attempting to start HTTPS server...");
            let cert_file = &mut BufReader::new(File::open(cert_path)?);
            let key_file = &mut BufReader::new(File::open(key_path)?);
            let cert_chain = certs(cert_file).map(|r| r.unwrap()).collect();
            let mut keys = pkcs8_private_keys(key_file)
                .map(|r| r.unwrap())
                .collect::<Vec<_>>();

            if keys.is_empty() {
                return Err(std::io::Error::new(
                    std::io::ErrorKind::Other,
                    "No private keys found in key file",
                ));
            }

            let tls_config = ServerConfig::builder()
                .with_no_client_auth()
                .with_single_cert(cert_chain, keys.remove(0).into())
                .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;

            info!("Successfully configured TLS. Binding to https://{}", addr);
            http_server = http_server.bind_rustls_0_23(addr, tls_config)?;
        }
    } else {
        info!("No CERT_PATH or KEY_PATH found in env. Starting plain HTTP server.");
        http_server = http_server.bind(addr)?;
    }

    http_server.run().await
}
