//! End-to-end determinism checks: same word, same pixels.

use wordmandala::{compute_seed, render_word, RenderConfig};

#[test]
fn same_word_renders_byte_identical() {
    let config = RenderConfig::square(128);
    let a = render_word("harmony", &config).expect("first render");
    let b = render_word("harmony", &config).expect("second render");
    assert_eq!(a.seed, b.seed);
    assert_eq!(a.pixel_digest, b.pixel_digest);
    assert_eq!(a.png_data, b.png_data);
}

#[test]
fn case_variants_render_identically() {
    // The seed is case-insensitive, and without a signature the raster
    // depends only on the seed.
    let config = RenderConfig::square(96);
    let lower = render_word("harmony", &config).unwrap();
    let upper = render_word("HARMONY", &config).unwrap();
    assert_eq!(lower.pixel_digest, upper.pixel_digest);
}

#[test]
fn different_words_render_differently() {
    let config = RenderConfig::square(96);
    let cat = render_word("cat", &config).unwrap();
    let bat = render_word("bat", &config).unwrap();
    assert_ne!(cat.seed, bat.seed);
    assert_ne!(cat.pixel_digest, bat.pixel_digest);
}

#[test]
fn signature_changes_pixels_but_not_seed() {
    let plain = render_word("ocean", &RenderConfig::square(128)).unwrap();
    let signed = render_word(
        "ocean",
        &RenderConfig { width: 128, height: 128, signature: true },
    )
    .unwrap();
    assert_eq!(plain.seed, signed.seed);
    assert_ne!(plain.pixel_digest, signed.pixel_digest);
}

#[test]
fn seed_is_independent_of_surface_size() {
    let small = render_word("ocean", &RenderConfig::square(64)).unwrap();
    let large = render_word("ocean", &RenderConfig::square(160)).unwrap();
    assert_eq!(small.seed, large.seed);
    assert_eq!(small.seed, compute_seed("ocean"));
}
