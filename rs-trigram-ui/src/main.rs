use std::time::Duration;

use eframe::{egui, Frame};
use egui::Context;

use reqwest::blocking::Client;
use reqwest::Result;

/// Training source selection on the UI side.
#[derive(Debug, PartialEq)]
enum TrainSource {
    Corpus,
    Custom,
}

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

    /// Sends a GET request to `/v1/generate` with the length cap.
    fn get_generated(&self, max_length: usize) -> Result<String> {
        let response = self.client
            .get("http://127.0.0.1:5000/v1/generate")
            .query(&[("max_length", max_length.to_string())])
            .send()?
            .error_for_status()?;

        Ok(response.text()?)
    }

    /// Sends a GET request to `/v1/corpora`.
    fn get_corpora(&self) -> Result<String> {
        let response = self.client
            .get("http://127.0.0.1:5000/v1/corpora")
            .send()?
            .error_for_status()?;

        Ok(response.text()?)
    }

    /// Sends a GET request to `/v1/model`.
    fn get_model(&self) -> Result<String> {
        let response = self.client
            .get("http://127.0.0.1:5000/v1/model")
            .send()?
            .error_for_status()?;

        Ok(response.text()?)
    }

    /// Sends a PUT request to `/v1/fit` naming a server-side corpus.
    fn put_fit_corpus(&self, name: &str) -> Result<String> {
        let response = self.client
            .put("http://127.0.0.1:5000/v1/fit")
            .query(&[("corpus", name)])
            .send()?
            .error_for_status()?;

        Ok(response.text()?)
    }

    /// Sends a PUT request to `/v1/fit` with pasted training text.
    fn put_fit_text(&self, text: &str) -> Result<String> {
        let response = self.client
            .put("http://127.0.0.1:5000/v1/fit")
            .body(text.to_owned())
            .send()?
            .error_for_status()?;

        Ok(response.text()?)
    }
}

/// Global UI state (MUST persist between frames in egui).
struct GeneratorUI {
    rest: RESTContext,
    last_output: Option<String>,
    model_summary: String,

    available_corpora: Vec<String>, // corpus names known to the server
    selected_corpus: String,

    train_source: TrainSource,
    custom_text: String,

    max_length: usize,
}

impl GeneratorUI {
    /// Initializes the UI with sane defaults.
    fn new() -> Result<Self> {
        let mut generator = Self {
            rest: RESTContext::new()?,
            last_output: None,
            model_summary: String::new(),

            available_corpora: Vec::new(),
            selected_corpus: String::new(),

            train_source: TrainSource::Corpus,
            custom_text: String::new(),

            max_length: 50,
        };
        generator.refresh_corpora();
        generator.refresh_model();
        Ok(generator)
    }

    /// Performs the generation request.
    fn generate(&mut self) {
        match self.rest.get_generated(self.max_length) {
            Ok(text) if text.is_empty() => {
                self.last_output = Some("(untrained model: nothing to generate)".to_owned());
            }
            Ok(text) => self.last_output = Some(text),
            Err(e) => self.last_output = Some(format!("Error: {e}")),
        }
    }

    /// Fetches the corpus list from the server.
    fn refresh_corpora(&mut self) {
        match self.rest.get_corpora() {
            Ok(list) => {
                self.available_corpora = list
                    .split('\n')
                    .map(|s| s.trim().to_owned())
                    .filter(|s| !s.is_empty())
                    .collect();
                if self.selected_corpus.is_empty() {
                    if let Some(first) = self.available_corpora.first() {
                        self.selected_corpus = first.clone();
                    }
                }
            }
            Err(e) => self.last_output = Some(format!("Error: {e}")),
        }
    }

    /// Fetches the model summary from the server.
    fn refresh_model(&mut self) {
        match self.rest.get_model() {
            Ok(summary) => self.model_summary = summary,
            Err(e) => self.model_summary = format!("Error: {e}"),
        }
    }

    /// Performs the training request for the selected source.
    fn train(&mut self) {
        let result = match self.train_source {
            TrainSource::Corpus => self.rest.put_fit_corpus(&self.selected_corpus),
            TrainSource::Custom => self.rest.put_fit_text(&self.custom_text),
        };
        match result {
            Ok(message) => self.last_output = Some(message),
            Err(e) => self.last_output = Some(format!("Error: {e}")),
        }
        self.refresh_model();
    }
}

impl eframe::App for GeneratorUI {
    /// UI update loop (called every frame).
    fn update(&mut self, ctx: &Context, _: &mut Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {

            egui::Grid::new("generator_grid")
                .num_columns(2)
                .spacing([20.0, 6.0])
                .striped(true)
                .show(ui, |ui| {

                    // max_length
                    ui.label("Maximum length (tokens)");
                    ui.add(
                        egui::DragValue::new(&mut self.max_length)
                            .range(0..=500)
                            .speed(1),
                    );
                    ui.end_row();

                    ui.separator();
                    ui.end_row();

                    // training source
                    ui.label("Training source");
                    ui.vertical(|ui| {
                        ui.radio_value(&mut self.train_source, TrainSource::Corpus, "Server corpus");
                        ui.radio_value(&mut self.train_source, TrainSource::Custom, "Pasted text");
                    });
                    ui.end_row();

                    // corpus picker
                    if self.train_source == TrainSource::Corpus {
                        ui.label("Corpus");
                        ui.vertical(|ui| {
                            for corpus in &self.available_corpora {
                                ui.radio_value(&mut self.selected_corpus, corpus.clone(), corpus);
                            }
                            if self.available_corpora.is_empty() {
                                ui.label("No corpus found on the server");
                            }
                        });
                        ui.end_row();
                    }

                    // pasted text input
                    if self.train_source == TrainSource::Custom {
                        ui.label("Training text");
                        ui.text_edit_multiline(&mut self.custom_text);
                        ui.end_row();
                    }

                    ui.separator();
                    ui.end_row();

                    // Train button
                    if ui
                        .add_sized([160.0, 40.0], egui::Button::new("Train"))
                        .clicked()
                    {
                        self.train();
                    }

                    // Generate button
                    if ui
                        .add_sized([160.0, 40.0], egui::Button::new("Generate"))
                        .clicked()
                    {
                        self.generate();
                    }
                    ui.end_row();
                });

            ui.separator();
            ui.label(&self.model_summary);

            // Output
            if let Some(output) = &self.last_output {
                ui.label(output);
            } else {
                ui.label("Train a model, then click Generate");
            }
        });
    }
}

/// Application entry point.
fn main() -> eframe::Result {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([460.0, 420.0])
            .with_resizable(true),
        ..Default::default()
    };

    eframe::run_native(
        "rs-trigram",
        options,
        Box::new(|_| Ok(Box::new(GeneratorUI::new()?))),
    )
}
