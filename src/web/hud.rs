use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlDivElement};

use crate::draw::{Label, Viewport};

const ROOT_STYLE: &str = "position:fixed;top:0;left:0;width:100%;height:100%;color:white;pointer-events:none;text-shadow:0 0 6px rgba(0,0,0,0.45);z-index:1000;";

struct LabelSlot {
    element: HtmlDivElement,
    text: String,
    css: String,
}

/// DOM overlay for everything drawn as text: scene titles, prompts, the score and the FPS meter.
pub struct Hud {
    document: Document,
    root: HtmlDivElement,
    fps: HtmlDivElement,
    font: String,
    slots: Vec<LabelSlot>,
}

impl Hud {
    pub fn new(document: &Document, font: &str) -> Result<Self, JsValue> {
        let body = document
            .body()
            .ok_or_else(|| JsValue::from_str("document has no body"))?;

        let root = create_div(document)?;
        root.set_class_name("hud-root");
        set_style(&root, ROOT_STYLE);

        let fps = create_div(document)?;
        fps.set_inner_text("FPS: --");
        set_style(
            &fps,
            "position:absolute;right:12px;top:8px;font:12px monospace;opacity:0.7;",
        );

        root.append_child(&fps)?;
        body.append_child(&root)?;

        Ok(Self {
            document: document.clone(),
            root,
            fps,
            font: format!("'{font}', monospace"),
            slots: Vec::new(),
        })
    }

    pub fn set_fps(&self, fps: f32) {
        self.fps
            .set_inner_text(&format!("FPS: {:>3.0}", fps.round().clamp(0.0, 999.0)));
    }

    /// Positions one div per label over the canvas, reusing divs between frames.
    pub fn sync(
        &mut self,
        labels: &[Label],
        viewport: &Viewport,
        canvas_origin: [f32; 2],
    ) -> Result<(), JsValue> {
        while self.slots.len() < labels.len() {
            let element = create_div(&self.document)?;
            self.root.append_child(&element)?;
            self.slots.push(LabelSlot {
                element,
                text: String::new(),
                css: String::new(),
            });
        }

        for (slot, label) in self.slots.iter_mut().zip(labels) {
            let [x, y] = viewport.point(label.pos);
            let transform = if label.centered {
                "transform:translate(-50%,-50%);"
            } else {
                ""
            };
            let css = format!(
                "position:absolute;left:{:.1}px;top:{:.1}px;{}font-family:{};font-size:{:.1}px;white-space:nowrap;",
                canvas_origin[0] + x,
                canvas_origin[1] + y,
                transform,
                self.font,
                label.size * viewport.scale,
            );
            if slot.css != css {
                set_style(&slot.element, &css);
                slot.css = css;
            }
            if slot.text != label.text {
                slot.element.set_inner_text(&label.text);
                slot.text.clone_from(&label.text);
            }
        }

        for slot in self.slots.iter_mut().skip(labels.len()) {
            if !slot.text.is_empty() {
                slot.element.set_inner_text("");
                slot.text.clear();
            }
        }
        Ok(())
    }

    pub fn set_error(&self, text: &str) {
        self.fps.set_inner_text(text);
        set_style(
            &self.fps,
            "position:absolute;left:16px;top:16px;color:#ff8080;font-weight:600;max-width:320px;line-height:1.4;white-space:pre-line;",
        );
    }
}

fn create_div(document: &Document) -> Result<HtmlDivElement, JsValue> {
    document
        .create_element("div")?
        .dyn_into::<HtmlDivElement>()
        .map_err(|_| JsValue::from_str("failed to create hud element"))
}

fn set_style(element: &HtmlDivElement, css: &str) {
    element.style().set_css_text(css);
}
