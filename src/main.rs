mod animator;
mod app;
mod platform;
mod render;

fn main() {
    env_logger::init();
    log::info!("Notefall starting up");

    if let Err(e) = app::run() {
        log::error!("Fatal error: {e}");
        std::process::exit(1);
    }
}
