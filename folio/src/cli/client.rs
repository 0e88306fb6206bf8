use std::process::ExitCode;

use client::gallery::{GalleryController, GalleryState, Phase};
use client::render::TableRenderer;
use client::ListingClient;

pub struct GalleryParams {
    pub uri: String,
    pub folder: String,
    pub step: Option<usize>,
    pub expansions: usize,
}

pub async fn show_gallery(params: GalleryParams) -> ExitCode {
    let source = match ListingClient::new(&params.uri) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let state = GalleryState::new(params.folder, params.step);
    let mut controller = GalleryController::new(state, source, TableRenderer::default());
    controller.mount().await;
    for _ in 0..params.expansions {
        controller.activate().await;
    }

    println!("{}", controller.renderer());
    match controller.state().phase() {
        Phase::Error(e) => {
            eprintln!("listing failed: {e}");
            ExitCode::FAILURE
        }
        _ => ExitCode::SUCCESS,
    }
}
