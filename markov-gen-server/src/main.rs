use std::io;
use std::path::Path;
use std::sync::RwLock;

use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{get, put, web, App, HttpResponse, HttpServer, Responder};

use log::{info, warn};
use serde::{Deserialize, Serialize};
use markov_gen_core::io::list_files;
use markov_gen_core::model::generator::Generator;
use markov_gen_core::model::settings::Settings;
use markov_gen_core::MarkovError;

mod config;

use config::{split_names, ServerConfig};

/// Extension of the corpus files in the data folder.
const CORPUS_EXTENSION: &str = "txt";

/// Query parameters of the `/v1/generate` endpoint
#[derive(Deserialize)]
struct GenerateParams {
	word_count: Option<usize>
}

/// Query parameters of the `/v1/load_corpora` endpoint
#[derive(Deserialize)]
struct CorporaQuery {
	names: Option<String>,
	chain_length: Option<usize>
}

/// Body of the `/v1/stats` endpoint
#[derive(Serialize, Deserialize, Debug)]
struct Stats {
	settings: Settings,
	distinct_keys: usize,
	observations: usize,
	sources: Vec<String>
}

struct SharedData {
	generator: Generator
}

/// Trains a fresh generator on `<data_dir>/<name>.txt` for each name.
fn load_corpora(data_dir: &Path, names: &[String], settings: Settings) -> Result<Generator, MarkovError> {
	let mut generator = Generator::new(settings)?;
	for name in names {
		if name.contains(['/', '\\']) || name.starts_with('.') {
			return Err(MarkovError::InvalidArgument(format!("invalid corpus name: {name}")));
		}
		generator.load_file(data_dir.join(format!("{name}.{CORPUS_EXTENSION}")))?;
	}
	Ok(generator)
}

/// Maps a core error to an HTTP response.
fn error_response(error: &MarkovError) -> HttpResponse {
	match error {
		MarkovError::Uninitialized => HttpResponse::Conflict().body(error.to_string()),
		MarkovError::InvalidArgument(_) => HttpResponse::BadRequest().body(error.to_string()),
		MarkovError::Io(e) if e.kind() == io::ErrorKind::NotFound => HttpResponse::NotFound().body(error.to_string()),
		MarkovError::Io(_) => HttpResponse::InternalServerError().body(error.to_string()),
	}
}

/// HTTP GET endpoint `/v1/generate`
///
/// Generates text from the loaded corpora. `word_count` defaults to the
/// configured word count and may not exceed `max_word_count`.
#[get("/v1/generate")]
async fn get_generated(
	data: web::Data<RwLock<SharedData>>,
	config: web::Data<ServerConfig>,
	query: web::Query<GenerateParams>,
) -> impl Responder {
	if let Some(word_count) = query.word_count {
		if word_count > config.max_word_count {
			return HttpResponse::BadRequest()
				.body(format!("word_count must be <= {}", config.max_word_count));
		}
	}

	let shared_data = match data.read() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Generator lock failed"),
	};

	let word_count = query.word_count.unwrap_or(shared_data.generator.settings().word_count());
	match shared_data.generator.generate_words(word_count) {
		Ok(result) => HttpResponse::Ok().body(result),
		Err(e) => error_response(&e),
	}
}

#[get("/v1/corpora")]
async fn get_corpora(config: web::Data<ServerConfig>) -> impl Responder {
	match list_files(&config.data_dir, CORPUS_EXTENSION) {
		Ok(files) => {
			let names: Vec<&str> = files
				.iter()
				.filter_map(|f| f.strip_suffix(&format!(".{CORPUS_EXTENSION}")))
				.collect();
			HttpResponse::Ok().body(names.join("\n"))
		}
		Err(_) => HttpResponse::InternalServerError().body("Failed to list corpora")
	}
}

#[get("/v1/loaded_corpora")]
async fn get_loaded_corpora(data: web::Data<RwLock<SharedData>>) -> impl Responder {
	let shared_data = match data.read() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Generator lock failed"),
	};
	HttpResponse::Ok().body(shared_data.generator.source_names().join("\n"))
}

#[get("/v1/stats")]
async fn get_stats(data: web::Data<RwLock<SharedData>>) -> impl Responder {
	let shared_data = match data.read() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Generator lock failed"),
	};
	let generator = &shared_data.generator;
	let table = generator.table();

	HttpResponse::Ok().json(Stats {
		settings: generator.settings().clone(),
		distinct_keys: table.map_or(0, |t| t.len()),
		observations: table.map_or(0, |t| t.observations()),
		sources: generator.source_names().to_vec(),
	})
}

/// HTTP PUT endpoint `/v1/load_corpora`
///
/// Trains a new generator on the listed corpora and swaps it in.
/// Training runs on the blocking pool, outside the lock; generation keeps
/// using the previous generator until the swap.
#[put("/v1/load_corpora")]
async fn put_corpora(
	data: web::Data<RwLock<SharedData>>,
	config: web::Data<ServerConfig>,
	query: web::Query<CorporaQuery>,
) -> impl Responder {
	let query_names = match &query.names {
		Some(s) if !s.trim().is_empty() => s.trim(),
		_ => return HttpResponse::BadRequest().body("Missing or empty corpus name"),
	};

	let mut settings = config.settings.clone();
	if let Some(chain_length) = query.chain_length {
		if let Err(e) = settings.set_chain_length(chain_length) {
			return error_response(&e);
		}
	}

	let data_dir = config.data_dir.clone();
	let names = split_names(query_names);
	let loaded = web::block(move || load_corpora(&data_dir, &names, settings)).await;

	let generator = match loaded {
		Ok(Ok(g)) => g,
		Ok(Err(e)) => {
			warn!("failed to load corpora {}: {}", query_names, e);
			return error_response(&e);
		}
		Err(_) => return HttpResponse::InternalServerError().body("Corpus loading was interrupted"),
	};

	let mut shared_data = match data.write() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Generator lock failed"),
	};
	shared_data.generator = generator;

	HttpResponse::Ok().body("Corpora loaded successfully")
}

fn routes(cfg: &mut web::ServiceConfig) {
	cfg.service(get_generated)
		.service(get_corpora)
		.service(get_loaded_corpora)
		.service(get_stats)
		.service(put_corpora);
}

/// Main entry point for the server.
///
/// Reads the configuration, trains on the startup corpora, wraps the
/// generator in a `RwLock` (generations only take the read lock) and
/// starts an Actix-web HTTP server.
#[actix_web::main]
async fn main() -> io::Result<()> {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

	let config = ServerConfig::from_env().map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
	let generator = load_corpora(&config.data_dir, &config.corpora, config.settings.clone()).map_err(io::Error::other)?;
	info!(
		"starting on {} with {} startup corpora from {}",
		config.bind,
		config.corpora.len(),
		config.data_dir.display()
	);

	let bind = config.bind.clone();
	let shared_generator = web::Data::new(RwLock::new(SharedData { generator }));
	let shared_config = web::Data::new(config);

	HttpServer::new(move || {
		App::new()
			.wrap(Cors::permissive())
			.wrap(Logger::default())
			.app_data(shared_generator.clone())
			.app_data(shared_config.clone())
			.configure(routes)
	})
		.bind(bind.as_str())?
		.run()
		.await
}
