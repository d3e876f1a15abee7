use crate::{error::json_config, handler::BudgetHandler, midware::jwt::jwt_validator};
use actix_web::web;
use actix_web_httpauth::middleware::HttpAuthentication;

pub fn init(cfg: &mut web::ServiceConfig) {
	cfg.service(
		web::scope("/budgets")
			.wrap(HttpAuthentication::bearer(jwt_validator))
			.app_data(json_config())
			.route("", web::get().to(BudgetHandler::list_budgets_handler))
			.route("", web::post().to(BudgetHandler::set_budget_handler)),
	);
}
