//! QR-Order Frontend Entry Point

mod app;
mod cart;
mod checkout;
mod commands;
mod components;
mod config;
mod context;
mod dom;
mod error;
mod live;
mod menu;
mod models;
mod pay;
mod staff;
mod store;

fn main() {
    console_error_panic_hook::set_once();
    let _ = console_logger::init(log::LevelFilter::Info);

    if let Err(err) = app::boot() {
        log::error!("[APP] boot failed: {}", err);
    }
}
