//! The upload page.
//!
//! Plain HTML with inline CSS. All interactivity lives in `static/script.js`,
//! which posts the form to `/upload` and renders the returned links.

use crate::resolution::Resolution;
use maud::{DOCTYPE, Markup, PreEscaped, html};

const STYLE: &str = r#"
:root { --bg: #101114; --panel: #1b1d22; --text: #e8e8ea; --muted: #8b8d95; --accent: #4f8cff; }
* { box-sizing: border-box; }
body { margin: 0; font-family: system-ui, sans-serif; background: var(--bg); color: var(--text); }
main { max-width: 960px; margin: 0 auto; padding: 2rem 1rem; }
h1 { font-weight: 600; margin-bottom: 0.25rem; }
.tagline { color: var(--muted); margin-top: 0; }
.drop-zone { border: 2px dashed var(--muted); border-radius: 12px; padding: 3rem 1rem; text-align: center; cursor: pointer; background: var(--panel); }
.drop-zone.dragover { border-color: var(--accent); }
.browse-btn { color: var(--accent); text-decoration: underline; }
fieldset { border: 1px solid #2c2f36; border-radius: 8px; margin: 1.5rem 0; display: flex; flex-wrap: wrap; gap: 1rem; }
#generate-btn { background: var(--accent); color: white; border: 0; border-radius: 8px; padding: 0.75rem 1.5rem; font-size: 1rem; cursor: pointer; }
#generate-btn:disabled { opacity: 0.6; cursor: wait; }
.hidden { display: none; }
.gallery { display: grid; grid-template-columns: repeat(auto-fill, minmax(200px, 1fr)); gap: 1rem; }
.result-card { background: var(--panel); border-radius: 8px; overflow: hidden; }
.result-img { width: 100%; height: 140px; object-fit: cover; display: block; }
.result-info { display: flex; justify-content: space-between; padding: 0.5rem 0.75rem; }
.download-link { color: var(--accent); }
"#;

/// Render the upload page with one pre-checked box per resolution.
pub fn index_page(resolutions: &[Resolution]) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { "WallGen" }
                style { (PreEscaped(STYLE)) }
            }
            body {
                main {
                    h1 { "WallGen" }
                    p class="tagline" { "One high-resolution image in, a wallpaper for every screen out." }

                    div id="drop-zone" class="drop-zone" {
                        h3 { "Drop an image here" }
                        p { "or " span class="browse-btn" { "browse" } }
                        input id="file-input" type="file" accept="image/*" hidden;
                    }

                    fieldset {
                        legend { "Resolutions" }
                        @for res in resolutions {
                            @let token = res.to_string();
                            label {
                                input type="checkbox" name="res" value=(token) checked;
                                " " (token)
                            }
                        }
                    }

                    button id="generate-btn" type="button" { "Generate Wallpapers" }

                    div id="progress-container" class="hidden" {
                        p { "Generating wallpapers..." }
                    }

                    section id="results-area" class="hidden" {
                        h2 { "Results" }
                        div id="gallery" class="gallery" {}
                    }
                }
                script src="/static/js/script.js" {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_checkbox_per_resolution() {
        let html = index_page(&[Resolution::new(1920, 1080), Resolution::new(1080, 2400)]).into_string();
        assert_eq!(html.matches(r#"name="res""#).count(), 2);
        assert!(html.contains(r#"value="1920x1080""#));
        assert!(html.contains(r#"value="1080x2400""#));
    }

    #[test]
    fn has_elements_the_script_expects() {
        let html = index_page(&[]).into_string();
        for id in ["drop-zone", "file-input", "generate-btn", "progress-container", "results-area", "gallery"] {
            assert!(html.contains(&format!(r#"id="{id}""#)), "missing #{id}");
        }
        assert!(html.contains("browse-btn"));
    }
}
