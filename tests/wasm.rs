//! Browser binding smoke tests (run with `wasm-pack test --headless --chrome`)

#![cfg(target_arch = "wasm32")]

use lingocore::RetrievalCortex;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn pages() -> JsValue {
    let pages = js_sys::Array::new();
    pages.push(&JsValue::from_str("Hello in Spanish is Hola."));
    pages.push(&JsValue::from_str("French greetings: Bonjour."));
    pages.push(&JsValue::from_str("Mandarin has four tones."));
    pages.into()
}

#[wasm_bindgen_test]
fn test_hashing_cortex_search() {
    let cortex = RetrievalCortex::with_hashing(pages(), 128).unwrap();
    assert_eq!(cortex.page_count(), 3);
    assert_eq!(cortex.get_dimensions(), 128);
    assert_eq!(cortex.get_model_name(), "hashing-128");

    let results = cortex.search("How do you say hello in Spanish?", Some(1)).unwrap();
    assert_eq!(results.length(), 1);
    assert_eq!(results.get(0).as_string().as_deref(), Some("Hello in Spanish is Hola."));
}

#[wasm_bindgen_test]
fn test_default_k_applies() {
    let cortex = RetrievalCortex::with_hashing(pages(), 64).unwrap();
    assert_eq!(cortex.search("tones", None).unwrap().length(), 3);
}

#[wasm_bindgen_test]
fn test_zero_k_is_js_error() {
    let cortex = RetrievalCortex::with_hashing(pages(), 64).unwrap();
    assert!(cortex.search("tones", Some(0)).is_err());
}

#[wasm_bindgen_test]
fn test_empty_pages_rejected() {
    assert!(RetrievalCortex::with_hashing(js_sys::Array::new().into(), 64).is_err());
}

#[wasm_bindgen_test]
fn test_unknown_embed_model_rejected_before_loading() {
    let embed_config = js_sys::JSON::parse(r#"{"model": "gpt-9"}"#).unwrap();
    let err = RetrievalCortex::new(b"", "{}", pages(), JsValue::UNDEFINED, embed_config)
        .err()
        .unwrap();
    let message = err.as_string().unwrap();
    assert!(message.starts_with("Invalid embed config"), "{}", message);
}
