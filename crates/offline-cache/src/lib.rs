//! Offline Cache Service Worker
//!
//! Cache-first strategy for the static assets of the ordering pages.
//! `static/sw.js` loads this module and forwards the worker lifecycle events
//! to the exported functions below; listeners must be registered during the
//! worker script's first evaluation, which is why the thin JS shim exists.

use js_sys::{Array, Promise};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{future_to_promise, JsFuture};
use web_sys::{Cache, CacheStorage, Request, ServiceWorkerGlobalScope};

/// Prefix shared by every cache this worker has ever created
pub const CACHE_PREFIX: &str = "qr-order-";

/// Current cache version
pub const CACHE_NAME: &str = "qr-order-v1";

/// Assets stored on install
pub const PRECACHE_ASSETS: &[&str] = &[
    "/static/css/app.css",
    "/static/manifest.json",
    "/static/icons/icon-192.png",
    "/static/icons/icon-512.png",
    "/static/pkg/qr_order_ui.js",
    "/static/pkg/qr_order_ui_bg.wasm",
];

/// Only GET requests go through the cache
pub fn is_cacheable(method: &str) -> bool {
    method.eq_ignore_ascii_case("GET")
}

/// A cache from an older worker version
pub fn is_stale(cache_name: &str) -> bool {
    cache_name.starts_with(CACHE_PREFIX) && cache_name != CACHE_NAME
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_logger::init(log::LevelFilter::Info);
}

/// Install step: populate the cache, then activate without waiting for old
/// pages to close. The returned promise is handed to `waitUntil`.
#[wasm_bindgen]
pub fn install(scope: ServiceWorkerGlobalScope) -> Promise {
    future_to_promise(async move {
        let caches = scope.caches()?;
        precache(&caches).await?;
        log::info!("[SW] precached {} assets into {}", PRECACHE_ASSETS.len(), CACHE_NAME);

        // The skipWaiting promise carries nothing we need
        let _ = scope.skip_waiting()?;
        Ok(JsValue::UNDEFINED)
    })
}

/// Activate step: evict older versions and take control of open pages.
#[wasm_bindgen]
pub fn activate(scope: ServiceWorkerGlobalScope) -> Promise {
    future_to_promise(async move {
        let caches = scope.caches()?;
        evict_stale(&caches).await?;
        JsFuture::from(scope.clients().claim()).await?;
        log::info!("[SW] activated {}", CACHE_NAME);
        Ok(JsValue::UNDEFINED)
    })
}

/// Fetch step: answer from the cache, else the network, else whatever the
/// cache had (possibly nothing, which surfaces as a network error).
#[wasm_bindgen]
pub fn respond(scope: ServiceWorkerGlobalScope, request: Request) -> Promise {
    future_to_promise(async move {
        if !is_cacheable(&request.method()) {
            return JsFuture::from(scope.fetch_with_request(&request)).await;
        }

        let caches = scope.caches()?;
        let cached = JsFuture::from(caches.match_with_request(&request)).await?;
        if !cached.is_undefined() {
            return Ok(cached);
        }

        match JsFuture::from(scope.fetch_with_request(&request)).await {
            Ok(response) => Ok(response),
            Err(err) => {
                log::warn!("[SW] network failed for {}: {:?}", request.url(), err);
                Ok(cached)
            }
        }
    })
}

async fn precache(caches: &CacheStorage) -> Result<(), JsValue> {
    let cache: Cache = JsFuture::from(caches.open(CACHE_NAME)).await?.dyn_into()?;
    let assets: Array = PRECACHE_ASSETS.iter().map(|path| JsValue::from_str(path)).collect();
    JsFuture::from(cache.add_all_with_str_sequence(&assets)).await?;
    Ok(())
}

async fn evict_stale(caches: &CacheStorage) -> Result<(), JsValue> {
    let names: Array = JsFuture::from(caches.keys()).await?.dyn_into()?;
    for name in names.iter().filter_map(|name| name.as_string()) {
        if is_stale(&name) {
            JsFuture::from(caches.delete(&name)).await?;
            log::info!("[SW] deleted stale cache {}", name);
        }
    }
    Ok(())
}
