//! DOM-backed sinks and counter containers.

use wasm_bindgen::JsCast;
use web_sys::Element;

use portfolio_counter_core::{Config, CounterContainer, CounterElement, TextSink};

/// Writes counter text into an element's `textContent`.
#[derive(Clone, Debug)]
pub struct ElementSink {
    element: Element,
}

impl ElementSink {
    pub fn new(element: Element) -> Self {
        Self { element }
    }
}

impl TextSink for ElementSink {
    fn set_text(&mut self, text: &str) {
        // Detached elements still accept writes; nobody sees them.
        self.element.set_text_content(Some(text));
    }
}

/// The stats section: its counter descendants carry their targets in an
/// attribute.
#[derive(Clone, Debug)]
pub struct DomStats {
    root: Element,
    counter_selector: String,
    target_attribute: String,
}

impl DomStats {
    pub fn new(root: Element, cfg: &Config) -> Self {
        Self {
            root,
            counter_selector: cfg.counter_selector.clone(),
            target_attribute: cfg.target_attribute.clone(),
        }
    }

    pub fn root(&self) -> &Element {
        &self.root
    }
}

impl CounterContainer for DomStats {
    type Sink = ElementSink;

    fn counters(&self) -> Vec<CounterElement<ElementSink>> {
        let list = match self.root.query_selector_all(&self.counter_selector) {
            Ok(list) => list,
            Err(e) => {
                log::error!("counter selector `{}` failed: {:?}", self.counter_selector, e);
                return Vec::new();
            }
        };
        (0..list.length())
            .filter_map(|i| list.get(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .map(|element| CounterElement {
                target: element.get_attribute(&self.target_attribute),
                sink: ElementSink::new(element),
            })
            .collect()
    }
}
