//! Metrics server module
//!
//! This module provides an HTTP server exposing Prometheus metrics for scraping and
//! a small JSON view of the managed loops.

use actix_web::middleware::{Compress, DefaultHeaders, NormalizePath};
use actix_web::{web, App, HttpResponse, HttpServer, Responder};
use serde_json::json;
use std::sync::Arc;
use tracing::{error, info};

use crate::{
	models::ControlStatus,
	services::lifecycle::TaskLifecycleController,
	utils::metrics::gather_metrics,
};

pub type ControllerData = web::Data<Arc<TaskLifecycleController>>;

/// Metrics endpoint handler
async fn metrics_handler() -> impl Responder {
	match gather_metrics() {
		Ok(buffer) => HttpResponse::Ok()
			.content_type("text/plain; version=0.0.4; charset=utf-8")
			.body(buffer),
		Err(e) => {
			error!("Error gathering metrics: {}", e);
			HttpResponse::InternalServerError().finish()
		}
	}
}

/// Loop status endpoint handler
async fn status_handler(controller: ControllerData) -> impl Responder {
	let loops: Vec<_> = controller
		.status_all()
		.await
		.into_iter()
		.map(|status| {
			json!({
				"loop": status.loop_id().as_str(),
				"running": matches!(status, ControlStatus::Running(_)),
				"status": status.to_string(),
			})
		})
		.collect();
	HttpResponse::Ok().json(json!({ "loops": loops }))
}

/// Inside a container the server has to listen on every interface
fn resolve_bind_address(bind_address: &str, in_docker: bool) -> String {
	if !in_docker {
		return bind_address.to_string();
	}
	match bind_address.rsplit_once(':') {
		Some((_, port)) => format!("0.0.0.0:{}", port),
		None => "0.0.0.0:8081".to_string(),
	}
}

// Create metrics server
pub fn create_metrics_server(
	bind_address: String,
	controller: Arc<TaskLifecycleController>,
) -> std::io::Result<actix_web::dev::Server> {
	let in_docker = std::env::var("IN_DOCKER").unwrap_or_default() == "true";
	let actual_bind_address = resolve_bind_address(&bind_address, in_docker);

	info!(
		"Starting metrics server on {} (actual bind: {})",
		bind_address, actual_bind_address
	);

	Ok(HttpServer::new(move || {
		App::new()
			.wrap(Compress::default())
			.wrap(NormalizePath::trim())
			.wrap(DefaultHeaders::new())
			.app_data(web::Data::new(controller.clone()))
			.route("/metrics", web::get().to(metrics_handler))
			.route("/status", web::get().to(status_handler))
	})
	.workers(2)
	.bind(actual_bind_address)?
	.shutdown_timeout(5)
	.disable_signals()
	.run())
}
