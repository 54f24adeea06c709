use anyhow::{anyhow, Context, Result};
use common::{ControlScheme, Shell};
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

use crate::js_err;

pub const ACTION_ATTRIBUTE: &str = "data-action";

const SWIPE_HINT_STYLE: &str = "font-size:12px; color:#aaa;";

fn element(document: &Document, id: &str) -> Result<Element> {
    document
        .get_element_by_id(id)
        .with_context(|| format!("Missing #{} element", id))
}

fn html_element(document: &Document, id: &str) -> Result<HtmlElement> {
    element(document, id)?
        .dyn_into::<HtmlElement>()
        .map_err(|_| anyhow!("#{} is not an HTML element", id))
}

fn set_display(element: &HtmlElement, value: &str) -> Result<()> {
    element.style().set_property("display", value).map_err(js_err)
}

/// Lobby, score labels and on-screen controls around the canvas
pub struct DomShell {
    document: Document,
    score: Element,
    high_score: Element,
    title: Element,
    controls: HtmlElement,
    lobby: HtmlElement,
    game_container: HtmlElement,
}

impl DomShell {
    pub fn new(document: Document) -> Result<Self> {
        Ok(Self {
            score: element(&document, "score")?,
            high_score: element(&document, "highscore")?,
            title: element(&document, "game-title")?,
            controls: html_element(&document, "mobile-controls")?,
            lobby: html_element(&document, "lobby")?,
            game_container: html_element(&document, "game-container")?,
            document,
        })
    }

    pub fn controls(&self) -> &HtmlElement {
        &self.controls
    }

    fn render_buttons(&self, rows: &[&[common::Action]]) -> Result<()> {
        for row in rows {
            let row_el = self.document.create_element("div").map_err(js_err)?;
            for action in row.iter() {
                let button = self.document.create_element("button").map_err(js_err)?;
                button.set_attribute(ACTION_ATTRIBUTE, action.as_str()).map_err(js_err)?;
                button.set_text_content(Some(action.label()));
                row_el.append_child(&button).map_err(js_err)?;
            }
            self.controls.append_child(&row_el).map_err(js_err)?;
        }
        Ok(())
    }
}

impl Shell for DomShell {
    fn show_lobby(&mut self) -> Result<()> {
        set_display(&self.lobby, "flex")?;
        set_display(&self.game_container, "none")
    }

    fn show_game(&mut self, title: &str) -> Result<()> {
        set_display(&self.lobby, "none")?;
        set_display(&self.game_container, "block")?;
        self.title.set_text_content(Some(title));
        Ok(())
    }

    fn set_score(&mut self, score: u32) {
        self.score.set_text_content(Some(&score.to_string()));
    }

    fn set_high_score(&mut self, score: u32) {
        self.high_score.set_text_content(Some(&score.to_string()));
    }

    fn set_controls(&mut self, scheme: ControlScheme) -> Result<()> {
        set_display(&self.controls, "block")?;
        self.controls.set_text_content(None);

        match scheme {
            ControlScheme::SwipeHint => {
                let hint = self.document.create_element("p").map_err(js_err)?;
                hint.set_attribute("style", SWIPE_HINT_STYLE).map_err(js_err)?;
                hint.set_text_content(Some(ControlScheme::SWIPE_HINT_TEXT));
                self.controls.append_child(&hint).map_err(js_err)?;
                Ok(())
            }
            ControlScheme::TetrisControls => self.render_buttons(scheme.button_rows()),
        }
    }
}
