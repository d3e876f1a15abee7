mod budget_routes;
mod config;
mod constants;
mod db;
mod error;
mod handler;
mod midware;
mod models;
mod repo;
mod schema;
#[cfg(test)]
mod tests;
mod transaction_routes;
mod user_routes;
use actix_cors::Cors;
use actix_web::{
	middleware::Logger,
	web::{self},
	App, HttpServer,
};
use anyhow::Context;
use std::sync::Arc;

use config::Settings;
use dotenv::dotenv;
use env_logger::Env;
use midware::jwt::JWT;
use repo::{PgRepository, Repository};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
	dotenv().ok();
	env_logger::init_from_env(Env::default().default_filter_or("info"));
	let settings = Settings::from_env()?;

	let pool = db::get_db_pool(&settings.database_url).context("Unable to create the db pool")?;
	db::init(&pool).context("Unable to initialize the db")?;

	let repo: Arc<dyn Repository> = Arc::new(PgRepository::new(pool));
	let repo = web::Data::from(repo);
	let jwt = web::Data::new(JWT::new(&settings.jwt_secret, settings.token_ttl_secs));
	let sock_url = settings.socket_url.clone();
	let settings = web::Data::new(settings);

	log::info!("{} listening on: {}..", settings.project_name, sock_url);

	HttpServer::new(move || {
		let cors = settings
			.cors_origins
			.iter()
			.fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
			.allow_any_method()
			.allow_any_header()
			.supports_credentials()
			.max_age(3600);

		App::new()
			.app_data(repo.clone())
			.app_data(jwt.clone())
			.app_data(settings.clone())
			.wrap(cors)
			.wrap(Logger::default())
			.route("/", web::get().to(handler::index_handler))
			.configure(user_routes::init)
			.configure(transaction_routes::init)
			.configure(budget_routes::init)
	})
	.bind(&sock_url)?
	.run()
	.await?;

	Ok(())
}
