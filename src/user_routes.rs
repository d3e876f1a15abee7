use crate::{error::json_config, handler::UserHandler};
use actix_web::web;

pub fn init(cfg: &mut web::ServiceConfig) {
	cfg.service(
		web::scope("/api/v1/auth")
			.app_data(json_config())
			.route("/signup", web::post().to(UserHandler::signup_handler))
			.route("/login", web::post().to(UserHandler::login_handler)),
	);
}
