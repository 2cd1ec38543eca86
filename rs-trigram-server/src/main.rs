use std::env;
use std::path::PathBuf;
use std::sync::Mutex;

use actix_cors::Cors;
use actix_web::{get, middleware, put, web, App, HttpResponse, HttpServer, Responder};

use serde::Deserialize;
use rs_trigram_core::io::{get_filename, list_files, normalize_folder, read_file};
use rs_trigram_core::model::trigram_model::{TrigramModel, DEFAULT_MAX_LENGTH};

/// Struct representing query parameters for the `/v1/generate` endpoint
#[derive(Deserialize)]
struct GenerateParams {
	max_length: Option<usize>
}

/// Struct representing query parameters for the `/v1/fit` endpoint
#[derive(Deserialize)]
struct FitParams {
	corpus: Option<String>
}

struct SharedData {
	model: TrigramModel,
	/// Name of the corpus the model was last trained on, `None` when the
	/// model is untrained or was trained from a request body.
	corpus: Option<String>
}

impl FitParams {
	/// Returns the validated corpus name, if one was requested.
	///
	/// Corpus names must be plain file stems: an empty name or one that
	/// traverses directories is rejected before any file access.
	fn corpus_name(&self) -> Result<Option<&str>, String> {
		match &self.corpus {
			None => Ok(None),
			Some(s) => {
				let name = s.trim();
				if name.is_empty() {
					Err("Corpus name cannot be empty".into())
				} else if name.contains('/') || name.contains('\\') || name.contains("..") {
					Err("Corpus name cannot contain path separators".into())
				} else {
					Ok(Some(name))
				}
			}
		}
	}
}

/// Resolves the corpus directory from `RS_TRIGRAM_DATA` (default `./data`).
fn data_dir() -> PathBuf {
	let folder = env::var("RS_TRIGRAM_DATA").unwrap_or_else(|_| "./data".to_owned());
	normalize_folder(&folder)
}

/// HTTP PUT endpoint `/v1/fit`
///
/// Trains the shared model. With `?corpus=<name>` the training text is
/// read from `<name>.txt` in the corpus directory; otherwise the raw
/// request body is used. An empty body (and no corpus parameter) resets
/// the model, which is a valid operation rather than an error.
#[put("/v1/fit")]
async fn put_fit(
	data: web::Data<Mutex<SharedData>>,
	query: web::Query<FitParams>,
	body: String,
) -> impl Responder {
	let corpus_name = match query.corpus_name() {
		Ok(name) => name.map(str::to_owned),
		Err(e) => return HttpResponse::BadRequest().body(e),
	};

	let (text, source) = match &corpus_name {
		Some(name) => {
			let path = data_dir().join(format!("{name}.txt"));
			match read_file(&path) {
				Ok(text) => {
					let label = get_filename(&path).unwrap_or_else(|_| name.clone());
					(text, Some(label))
				}
				Err(e) => {
					return HttpResponse::InternalServerError()
						.body(format!("Failed to load corpus: {e}"))
				}
			}
		}
		None => (body, None),
	};

	let mut shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};

	shared_data.model.fit(&text);
	shared_data.corpus = source;

	if shared_data.model.token_count() == 0 {
		HttpResponse::Ok().body("Model reset (empty training text)")
	} else {
		HttpResponse::Ok().body(format!(
			"Trained on {} tokens ({} contexts)",
			shared_data.model.token_count(),
			shared_data.model.context_count()
		))
	}
}

/// HTTP GET endpoint `/v1/generate`
///
/// Generates a sequence from the shared model. An untrained model
/// yields an empty body, which is the documented behavior rather than
/// an error.
#[get("/v1/generate")]
async fn get_generated(data: web::Data<Mutex<SharedData>>, query: web::Query<GenerateParams>) -> impl Responder {
	let max_length = query.max_length.unwrap_or(DEFAULT_MAX_LENGTH);

	let shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};

	HttpResponse::Ok().body(shared_data.model.generate(max_length))
}

/// HTTP GET endpoint `/v1/corpora`
///
/// Lists the corpus names available in the corpus directory.
#[get("/v1/corpora")]
async fn get_corpora() -> impl Responder {
	match list_files(data_dir(), "txt") {
		Ok(files) => HttpResponse::Ok().body(files.join("\n").replace(".txt", "")),
		Err(_) => HttpResponse::InternalServerError().body("Failed to list corpora")
	}
}

/// HTTP GET endpoint `/v1/model`
///
/// Reports the current model state: the source corpus (`inline` when
/// the model was trained from a request body) and the token and context
/// counts, or `untrained`.
#[get("/v1/model")]
async fn get_model(data: web::Data<Mutex<SharedData>>) -> impl Responder {
	let shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};

	if shared_data.model.token_count() == 0 {
		return HttpResponse::Ok().body("untrained");
	}

	HttpResponse::Ok().body(format!(
		"corpus: {}\ntokens: {}\ncontexts: {}",
		shared_data.corpus.as_deref().unwrap_or("inline"),
		shared_data.model.token_count(),
		shared_data.model.context_count()
	))
}

/// Main entry point for the server.
///
/// Holds one trigram model behind a `Mutex` shared across workers and
/// exposes it through a small plain-text REST API.
///
/// # Notes
/// - The bind address comes from `RS_TRIGRAM_ADDR` (default 127.0.0.1:5000).
/// - The corpus directory comes from `RS_TRIGRAM_DATA` (default ./data).
#[actix_web::main]
async fn main() -> std::io::Result<()> {
	env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

	let shared_data = SharedData {
		model: TrigramModel::new(),
		corpus: None,
	};
	let shared_model = web::Data::new(Mutex::new(shared_data));

	let addr = env::var("RS_TRIGRAM_ADDR").unwrap_or_else(|_| "127.0.0.1:5000".to_owned());
	log::info!("listening on {addr}, corpora in {}", data_dir().display());

	HttpServer::new(move || {
		App::new()
			.app_data(shared_model.clone())
			.wrap(middleware::Logger::default())
			.wrap(Cors::permissive())
			.service(put_fit)
			.service(get_generated)
			.service(get_corpora)
			.service(get_model)
	})
		.bind(addr)?
		.run()
		.await
}

#[cfg(test)]
mod tests {
	use super::*;
	use actix_web::{http::StatusCode, test};

	fn shared() -> web::Data<Mutex<SharedData>> {
		web::Data::new(Mutex::new(SharedData {
			model: TrigramModel::new(),
			corpus: None,
		}))
	}

	#[actix_web::test]
	async fn generate_on_untrained_model_returns_empty_body() {
		let app = test::init_service(App::new().app_data(shared()).service(get_generated)).await;

		let req = test::TestRequest::get().uri("/v1/generate").to_request();
		let body = test::call_and_read_body(&app, req).await;
		assert!(body.is_empty());
	}

	#[actix_web::test]
	async fn fit_from_body_then_generate_round_trip() {
		let app = test::init_service(
			App::new()
				.app_data(shared())
				.service(put_fit)
				.service(get_generated)
				.service(get_model),
		)
		.await;

		let req = test::TestRequest::put()
			.uri("/v1/fit")
			.set_payload("the cat sat on the mat")
			.to_request();
		let resp = test::call_service(&app, req).await;
		assert!(resp.status().is_success());

		let req = test::TestRequest::get()
			.uri("/v1/generate?max_length=10")
			.to_request();
		let body = test::call_and_read_body(&app, req).await;
		let text = std::str::from_utf8(&body).unwrap();
		assert!(!text.is_empty());
		assert!(text.split_whitespace().count() <= 10);

		let req = test::TestRequest::get().uri("/v1/model").to_request();
		let body = test::call_and_read_body(&app, req).await;
		let summary = std::str::from_utf8(&body).unwrap();
		assert!(summary.contains("corpus: inline"));
		assert!(summary.contains("tokens: 6"));
		assert!(summary.contains("contexts: 4"));
	}

	#[actix_web::test]
	async fn fit_with_empty_body_resets_the_model() {
		let app = test::init_service(
			App::new()
				.app_data(shared())
				.service(put_fit)
				.service(get_generated)
				.service(get_model),
		)
		.await;

		let req = test::TestRequest::put()
			.uri("/v1/fit")
			.set_payload("one two three four")
			.to_request();
		test::call_service(&app, req).await;

		let req = test::TestRequest::put().uri("/v1/fit").to_request();
		let resp = test::call_service(&app, req).await;
		assert!(resp.status().is_success());

		let req = test::TestRequest::get().uri("/v1/generate").to_request();
		let body = test::call_and_read_body(&app, req).await;
		assert!(body.is_empty());

		let req = test::TestRequest::get().uri("/v1/model").to_request();
		let body = test::call_and_read_body(&app, req).await;
		assert_eq!(&body[..], &b"untrained"[..]);
	}

	#[actix_web::test]
	async fn fit_rejects_names_that_traverse_directories() {
		let app = test::init_service(App::new().app_data(shared()).service(put_fit)).await;

		let req = test::TestRequest::put()
			.uri("/v1/fit?corpus=../secrets")
			.to_request();
		let resp = test::call_service(&app, req).await;
		assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

		let req = test::TestRequest::put().uri("/v1/fit?corpus=").to_request();
		let resp = test::call_service(&app, req).await;
		assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
	}

	#[actix_web::test]
	async fn fit_reports_a_missing_corpus_file() {
		let app = test::init_service(App::new().app_data(shared()).service(put_fit)).await;

		let req = test::TestRequest::put()
			.uri("/v1/fit?corpus=no-such-corpus-anywhere")
			.to_request();
		let resp = test::call_service(&app, req).await;
		assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
	}
}
