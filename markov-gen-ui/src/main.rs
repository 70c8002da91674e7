use std::collections::BTreeSet;
use std::time::Duration;

use eframe::{egui, Frame};
use egui::Context;

use reqwest::blocking::Client;
use reqwest::Result;

const SERVER: &str = "http://127.0.0.1:5000";

/// REST context holding a reusable blocking HTTP client.
struct RESTContext {
    client: Client,
}

impl RESTContext {
    /// Creates a new REST context with a timeout.
    fn new() -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::new(5, 0))
            .build()?;
        Ok(Self { client })
    }

    /// Sends a GET request to `endpoint` and returns the body as text.
    fn get(&self, endpoint: &str, params: &[(String, String)]) -> Result<String> {
        let response = self.client
            .get(format!("{SERVER}{endpoint}"))
            .query(params)
            .send()?
            .error_for_status()?;

        Ok(response.text()?)
    }

    /// Sends a PUT request to `/v1/load_corpora`.
    fn put_load_corpora(&self, names: &str, chain_length: usize) -> Result<String> {
        let response = self.client
            .put(format!("{SERVER}/v1/load_corpora"))
            .query(&[("names", names.to_owned()), ("chain_length", chain_length.to_string())])
            .send()?
            .error_for_status()?;

        Ok(response.text()?)
    }
}

/// Splits a newline separated server answer, dropping blank lines.
fn lines(body: &str) -> impl Iterator<Item = String> + '_ {
    body.lines()
        .map(|s| s.trim().to_owned())
        .filter(|s| !s.is_empty())
}

/// Global UI state (MUST persist between frames in egui).
struct GeneratorUI {
    rest: RESTContext,
    last_text: Option<String>,
    stats: String,

    available_corpora: Vec<String>,
    selected_corpora: BTreeSet<String>,

    chain_length: usize,
    word_count: usize,
}

impl GeneratorUI {
    /// Initializes the UI with sane defaults.
    fn new() -> Result<Self> {
        let mut generator = Self {
            rest: RESTContext::new()?,
            last_text: None,
            stats: String::new(),

            available_corpora: Vec::new(),
            selected_corpora: BTreeSet::new(),

            chain_length: 3,
            word_count: 30,
        };
        generator.get_corpora();
        generator.get_loaded_corpora();
        generator.get_stats();
        Ok(generator)
    }

    /// Performs the generation request.
    fn get_generated(&mut self) {
        let params = vec![("word_count".to_owned(), self.word_count.to_string())];
        match self.rest.get("/v1/generate", &params) {
            Ok(text) => self.last_text = Some(text),
            Err(e) => self.last_text = Some(format!("Error: {e}")),
        }
    }

    /// Performs the available corpora request.
    fn get_corpora(&mut self) {
        match self.rest.get("/v1/corpora", &[]) {
            Ok(body) => self.available_corpora = lines(&body).collect(),
            Err(e) => self.last_text = Some(format!("Error: {e}")),
        }
    }

    /// Performs the loaded corpora request.
    fn get_loaded_corpora(&mut self) {
        match self.rest.get("/v1/loaded_corpora", &[]) {
            Ok(body) => self.selected_corpora = lines(&body).collect(),
            Err(e) => self.last_text = Some(format!("Error: {e}")),
        }
    }

    /// Performs the stats request.
    fn get_stats(&mut self) {
        self.stats = match self.rest.get("/v1/stats", &[]) {
            Ok(body) => body,
            Err(e) => format!("Error: {e}"),
        };
    }

    /// Trains the server on the selected corpora.
    fn put_load_corpora(&mut self) {
        if self.selected_corpora.is_empty() {
            return;
        }
        let names = self.selected_corpora.iter().cloned().collect::<Vec<_>>().join(",");
        match self.rest.put_load_corpora(&names, self.chain_length) {
            Ok(body) => self.last_text = Some(body),
            Err(e) => self.last_text = Some(format!("Error: {e}")),
        }
        self.get_stats();
    }
}

impl eframe::App for GeneratorUI {
    /// UI update loop (called every frame).
    fn update(&mut self, ctx: &Context, _: &mut Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            let mut retrain = false;

            egui::Grid::new("generator_grid")
                .num_columns(2)
                .spacing([20.0, 6.0])
                .striped(true)
                .show(ui, |ui| {
                    ui.label("Chain length");
                    retrain |= ui
                        .add(egui::DragValue::new(&mut self.chain_length).range(1..=10).speed(1))
                        .changed();
                    ui.end_row();

                    ui.label("Word count");
                    ui.add(egui::DragValue::new(&mut self.word_count).range(1..=1000).speed(1));
                    ui.end_row();

                    ui.separator();
                    ui.end_row();

                    if ui
                        .add_sized([200.0, 40.0], egui::Button::new("Generate"))
                        .clicked()
                    {
                        self.get_generated();
                    }

                    if let Some(text) = &self.last_text {
                        ui.label(text);
                    } else {
                        ui.label("Click Generate to start");
                    }
                    ui.end_row();
                });

            ui.separator();
            for corpus in &self.available_corpora {
                let mut checked = self.selected_corpora.contains(corpus);

                if ui.checkbox(&mut checked, corpus).changed() {
                    retrain = true;
                    if checked {
                        self.selected_corpora.insert(corpus.clone());
                    } else {
                        self.selected_corpora.remove(corpus);
                    }
                }
            }

            if retrain {
                self.put_load_corpora();
            }

            ui.separator();
            ui.label(&self.stats);
        });
    }
}

/// Application entry point.
fn main() -> eframe::Result {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([440.0, 380.0])
            .with_resizable(true),
        ..Default::default()
    };

    eframe::run_native(
        "markov-generator",
        options,
        Box::new(|_| Ok(Box::new(GeneratorUI::new()?))),
    )
}
