//! Quick manual check of the JSON boundary against the bundled content.
//!
//! Run with `cargo run -p ffi --example test_ffi`.

fn main() {
    let item = engine::content::builtin_items()["flame_tongue"];

    println!("{}", ffi::version());
    println!("buttons: {}", ffi::card_buttons_json(item, ""));
    println!("group 1: {}", ffi::resolve_group_json(item, "1"));
    println!("stale:   {}", ffi::resolve_group_json(item, "9"));
    println!(
        "normalized: {}",
        ffi::normalize_config_json(r#"{"groups":[{"label":"","parts":["0"]}],"versatile":"0"}"#)
    );
}
