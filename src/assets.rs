//! Sprite loading for the web build
//!
//! All images are fetched up front before the game loop starts, so the
//! renderer never has to deal with half-loaded frames.

use wasm_bindgen::JsValue;
use wasm_bindgen_futures::JsFuture;
use web_sys::HtmlImageElement;

/// Every sprite the renderer needs, fully decoded
pub struct Assets {
    pub background: HtmlImageElement,
    pub ground: HtmlImageElement,
    pub block: HtmlImageElement,
    pub slime: HtmlImageElement,
    pub spike: HtmlImageElement,
    pub pillar: HtmlImageElement,
    /// Horizontal sheet of 32x32 frames
    pub portal: HtmlImageElement,
    pub player_idle: HtmlImageElement,
    pub player_walk: [HtmlImageElement; 2],
    pub health_bar: HtmlImageElement,
}

impl Assets {
    pub async fn load() -> Result<Self, JsValue> {
        Ok(Self {
            background: load_image("assets/background.png").await?,
            ground: load_image("assets/ground.png").await?,
            block: load_image("assets/block.png").await?,
            slime: load_image("assets/slime.png").await?,
            spike: load_image("assets/spike.png").await?,
            pillar: load_image("assets/pillar.png").await?,
            portal: load_image("assets/portal.png").await?,
            player_idle: load_image("assets/player_idle.png").await?,
            player_walk: [
                load_image("assets/player_walk1.png").await?,
                load_image("assets/player_walk2.png").await?,
            ],
            health_bar: load_image("assets/health_bar.png").await?,
        })
    }
}

/// Resolve once the image has decoded, reject on a missing file.
async fn load_image(src: &str) -> Result<HtmlImageElement, JsValue> {
    let img = HtmlImageElement::new()?;
    let promise = js_sys::Promise::new(&mut |resolve, reject| {
        img.set_onload(Some(&resolve));
        img.set_onerror(Some(&reject));
    });
    img.set_src(src);
    JsFuture::from(promise).await?;
    img.set_onload(None);
    img.set_onerror(None);
    Ok(img)
}
