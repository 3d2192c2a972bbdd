use std::path::{Path, PathBuf};
use std::sync::Mutex;

use actix_web::{get, put, web, App, HttpResponse, HttpServer, Responder};
use clap::Parser;
use serde::Deserialize;

use markov_gen_core::model::{LanguageModel, Seed};

/// Serves text generated from one character Markov model.
#[derive(Parser, Debug)]
#[command(name = "markov-gen-server", version)]
struct Args {
	/// Corpus file trained on at start-up
	corpus: PathBuf,

	/// Number of characters in a window
	#[arg(long, default_value_t = 3)]
	window: usize,

	/// Fixed seed for reproducible output (random if absent)
	#[arg(long)]
	seed: Option<u64>,

	/// Directory holding the `<name>.txt` corpora accepted by `/v1/train`
	#[arg(long, default_value = "./data")]
	data_dir: PathBuf,

	/// Largest `length` accepted by `/v1/generate`
	#[arg(long, default_value_t = 10_000)]
	max_length: usize,

	#[arg(long, default_value = "127.0.0.1")]
	host: String,

	#[arg(long, default_value_t = 5000)]
	port: u16,
}

impl Args {
	fn seed(&self) -> Seed {
		self.seed.map_or(Seed::Entropy, Seed::Fixed)
	}
}

/// Query parameters for the `/v1/generate` endpoint
#[derive(Deserialize)]
struct GenerateParams {
	initial_text: String,
	length: Option<usize>,
}

#[derive(Deserialize)]
struct TableQuery {
	window: String,
}

#[derive(Deserialize)]
struct TrainQuery {
	name: String,
}

struct SharedData {
	model: LanguageModel,
}

/// Request limits and locations, fixed at start-up.
struct ServerConfig {
	data_dir: PathBuf,
	max_length: usize,
}

/// Resolves a corpus name to `<data_dir>/<name>.txt`.
///
/// # Errors
/// Returns an error if the name is empty or could leave `data_dir`.
fn corpus_path(data_dir: &Path, name: &str) -> Result<PathBuf, String> {
	if name.is_empty() || name.contains(['/', '\\']) || name.contains("..") {
		return Err(format!("Invalid corpus name {:?}", name));
	}
	Ok(data_dir.join(format!("{name}.txt")))
}

/// HTTP GET endpoint `/v1/generate`
///
/// Returns the generated text as the response body.
#[get("/v1/generate")]
async fn get_generated(
	data: web::Data<Mutex<SharedData>>,
	config: web::Data<ServerConfig>,
	query: web::Query<GenerateParams>,
) -> impl Responder {
	let length = query.length.unwrap_or(100);
	if length > config.max_length {
		return HttpResponse::BadRequest().body(format!("length must be <= {}", config.max_length));
	}

	let mut shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};

	match shared_data.model.generate(&query.initial_text, length) {
		Ok(result) => HttpResponse::Ok().body(result),
		Err(e) => HttpResponse::BadRequest().body(e.to_string()),
	}
}

/// HTTP GET endpoint `/v1/table`
///
/// Returns the frequency table of one window as JSON.
#[get("/v1/table")]
async fn get_table(data: web::Data<Mutex<SharedData>>, query: web::Query<TableQuery>) -> impl Responder {
	let shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};

	match shared_data.model.table(&query.window) {
		Some(table) => HttpResponse::Ok().json(table),
		None => HttpResponse::NotFound().body(format!("Unknown window {:?}", query.window)),
	}
}

#[get("/v1/model")]
async fn get_model(data: web::Data<Mutex<SharedData>>) -> impl Responder {
	let shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};
	HttpResponse::Ok().body(shared_data.model.to_string())
}

/// HTTP PUT endpoint `/v1/train`
///
/// Adds the counts of the corpus `<data_dir>/<name>.txt` to the model,
/// then refreshes its probabilities.
#[put("/v1/train")]
async fn put_train(
	data: web::Data<Mutex<SharedData>>,
	config: web::Data<ServerConfig>,
	query: web::Query<TrainQuery>,
) -> impl Responder {
	let path = match corpus_path(&config.data_dir, query.name.trim()) {
		Ok(path) => path,
		Err(e) => return HttpResponse::BadRequest().body(e),
	};

	let mut shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};

	match shared_data.model.train_file(&path) {
		Ok(()) => HttpResponse::Ok().body(format!("Model now has {} windows", shared_data.model.len())),
		Err(e) => HttpResponse::InternalServerError().body(format!("Failed to train: {e}")),
	}
}

/// Main entry point for the server.
///
/// Trains the model once, wraps it in a `Mutex` so requests use it one at
/// a time, and starts an Actix-web HTTP server.
#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

	let args = Args::parse();

	let mut model = LanguageModel::new(args.window, args.seed())?;
	model.train_file(&args.corpus)?;
	log::info!("trained {} windows from {}", model.len(), args.corpus.display());

	let shared_model = web::Data::new(Mutex::new(SharedData { model }));
	let config = web::Data::new(ServerConfig { data_dir: args.data_dir.clone(), max_length: args.max_length });

	log::info!("listening on {}:{}", args.host, args.port);
	HttpServer::new(move || {
		App::new()
			.app_data(shared_model.clone())
			.app_data(config.clone())
			.service(get_generated)
			.service(get_table)
			.service(get_model)
			.service(put_train)
	})
		.bind((args.host.as_str(), args.port))?
		.run()
		.await?;

	Ok(())
}
