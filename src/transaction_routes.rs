use crate::{
	error::{json_config, path_config, query_config},
	handler::TransactionHandler,
	midware::jwt::jwt_validator,
};
use actix_web::web;
use actix_web_httpauth::middleware::HttpAuthentication;

pub fn init(cfg: &mut web::ServiceConfig) {
	cfg.service(
		web::scope("/transactions")
			.wrap(HttpAuthentication::bearer(jwt_validator))
			.app_data(json_config())
			.app_data(path_config())
			.app_data(query_config())
			.route("", web::get().to(TransactionHandler::list_transactions_handler))
			.route("", web::post().to(TransactionHandler::create_transaction_handler))
			.route("/{id}", web::put().to(TransactionHandler::update_transaction_handler))
			.route("/{id}", web::delete().to(TransactionHandler::delete_transaction_handler)),
	);
}
