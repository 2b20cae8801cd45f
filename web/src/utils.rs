use concentration_core::SymbolKey;

/// Drawn face of each symbol key in the default pool.
pub(crate) const SYMBOL_GLYPHS: [&str; 15] = [
    "💻", "🐙", "📄", "🔀", "⌨", "🗄", "🖧", "🧩", "🔑", "💬", "🎨", "🌐", "📚", "📦", "🖥",
];

pub(crate) fn symbol_glyph(symbol: SymbolKey) -> &'static str {
    SYMBOL_GLYPHS
        .get(usize::from(symbol.0))
        .copied()
        .unwrap_or("?")
}

/// Formats seconds as `mm:ss`.
pub(crate) fn format_clock(secs: u32) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Picker label for a time limit: whole minutes from a minute up, seconds below.
pub(crate) fn format_time_limit(secs: u32) -> String {
    if secs >= 60 {
        format!("{}min", secs / 60)
    } else {
        format!("{}s", secs)
    }
}

/// Engine seed drawn from `Math.random`, 32 bits at a time.
pub(crate) fn js_random_seed() -> u64 {
    let half = || (js_sys::Math::random() * f64::from(u32::MAX)) as u64;
    (half() << 32) | half()
}

#[cfg(test)]
mod tests {
    use super::*;
    use concentration_core::SymbolPool;

    #[test]
    fn clock_pads_minutes_and_seconds() {
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(75), "01:15");
        assert_eq!(format_clock(180), "03:00");
        assert_eq!(format_clock(6000), "100:00");
    }

    #[test]
    fn time_limits_label_in_minutes_from_one_minute() {
        assert_eq!(format_time_limit(15), "15s");
        assert_eq!(format_time_limit(59), "59s");
        assert_eq!(format_time_limit(60), "1min");
        assert_eq!(format_time_limit(120), "2min");
        assert_eq!(format_time_limit(180), "3min");
    }

    #[test]
    fn default_pool_has_a_glyph_per_symbol() {
        for &symbol in SymbolPool::default().keys() {
            assert_ne!(symbol_glyph(symbol), "?");
        }
        assert_eq!(symbol_glyph(SymbolKey(99)), "?");
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn random_seeds_use_both_halves() {
        let seeds: Vec<u64> = (0..8).map(|_| js_random_seed()).collect();

        assert!(seeds.iter().any(|seed| seed >> 32 != 0));
        assert!(seeds.iter().any(|seed| seed & u64::from(u32::MAX) != 0));
    }
}
