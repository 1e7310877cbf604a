// src/server/mod.rs
use crate::api::*;
use crate::config::Config;
use crate::database::DbPool;
use rocket::data::{Limits, ToByteUnit};
use rocket::fs::FileServer;
use rocket::{routes, Build, Rocket};

pub mod routes;

pub struct ServerState {
    pub config: Config,
    pub db_pool: DbPool,
}

pub fn build_rocket(config: Config, db_pool: DbPool) -> Rocket<Build> {
    let figment = rocket::Config::figment()
        .merge(("port", config.server.port))
        .merge((
            "limits",
            Limits::default()
                .limit("file", 10.mebibytes())
                .limit("data-form", 12.mebibytes()),
        ));

    let public_dir = config.server.public_dir.clone();
    let state = ServerState { config, db_pool };

    rocket::custom(figment)
        .manage(state)
        .mount(
            "/",
            routes![
                routes::health::health_check,
                get_companies,
                get_stats,
                import_csv,
                import_csv_without_upload,
            ],
        )
        .mount("/", FileServer::from(public_dir))
}
