use std::collections::HashMap;

pub fn builtin_items() -> HashMap<&'static str, &'static str> {
    HashMap::from([
        (
            "flame_tongue",
            include_str!("../content/items/flame_tongue.json"),
        ),
        (
            "dawnmote_rod",
            include_str!("../content/items/dawnmote_rod.json"),
        ),
        (
            "green_flame_blade",
            include_str!("../content/items/green_flame_blade.json"),
        ),
    ])
}
