//! Image inspection overlay.
//!
//! Images inside captioned figures become activatable. Activating one copies
//! its source, alternative text and caption into a single shared
//! [`ViewerState`], mirrors that state into the overlay markup, and shows the
//! overlay through the host's overlay controller, or by forcing the container
//! visible when the host has none.

use super::events::{EventKind, EventTarget, Handler, Listeners};
use crate::config::{CompiledSelectors, EnhanceConfig};
use crate::dom::{Document, NodeId};
use crate::host::Host;

/// Contents of the overlay viewer. Each activation overwrites all fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewerState {
    pub source: String,
    pub alt: String,
    /// Caption text, empty when the figure has no caption.
    pub caption: String,
}

/// How the overlay gets displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    /// The host's overlay controller shows it.
    Controller,
    /// The container's `display` is forced to `block`.
    DirectVisibility,
}

/// Elements of the synthesized overlay.
#[derive(Debug, Clone, Copy)]
struct Overlay {
    container: NodeId,
    title: NodeId,
    image: NodeId,
    caption: NodeId,
}

impl Overlay {
    fn build(doc: &mut Document, root: NodeId, config: &EnhanceConfig) -> Self {
        let ids = &config.ids;
        let container = doc.append_element(
            root,
            "div",
            &[
                ("class", "modal fade"),
                ("id", ids.overlay.as_str()),
                ("tabindex", "-1"),
                ("aria-labelledby", ids.overlay_label.as_str()),
                ("aria-hidden", "true"),
            ],
        );
        let dialog = doc.append_element(
            container,
            "div",
            &[("class", "modal-dialog modal-dialog-centered modal-lg")],
        );
        let content = doc.append_element(dialog, "div", &[("class", "modal-content")]);

        let header = doc.append_element(content, "div", &[("class", "modal-header")]);
        let title = doc.append_element(
            header,
            "h5",
            &[("class", "modal-title"), ("id", ids.overlay_label.as_str())],
        );
        doc.append_element(
            header,
            "button",
            &[
                ("type", "button"),
                ("class", "btn-close"),
                ("data-bs-dismiss", "modal"),
                ("aria-label", config.strings.close_overlay.as_str()),
            ],
        );

        let body = doc.append_element(content, "div", &[("class", "modal-body text-center")]);
        let image = doc.append_element(
            body,
            "img",
            &[("src", ""), ("class", "img-fluid lightbox-img"), ("alt", "")],
        );
        let caption = doc.append_element(
            body,
            "p",
            &[("class", "mt-2 lightbox-caption text-muted")],
        );

        Self {
            container,
            title,
            image,
            caption,
        }
    }

    /// Recover an overlay built by an earlier pass.
    fn locate(doc: &Document, container: NodeId) -> Option<Self> {
        let part = |class: &str| {
            doc.descendants(container)
                .into_iter()
                .find(|&n| doc.has_class(n, class))
        };
        Some(Self {
            container,
            title: part("modal-title")?,
            image: part("lightbox-img")?,
            caption: part("lightbox-caption")?,
        })
    }
}

/// Shared overlay viewer for every eligible image in the content root.
#[derive(Debug)]
pub struct MediaInspector {
    overlay: Overlay,
    images: Vec<NodeId>,
    state: ViewerState,
}

impl MediaInspector {
    /// Set up the overlay, or return `None` when the root has no eligible
    /// images. Nothing is added to the document in that case.
    pub(crate) fn install(
        doc: &mut Document,
        root: NodeId,
        config: &EnhanceConfig,
        selectors: &CompiledSelectors,
    ) -> Option<Self> {
        doc.select_first(root, &selectors.images)?;

        let overlay = match doc.get_by_id(&config.ids.overlay) {
            Some(existing) => Overlay::locate(doc, existing)?,
            None => Overlay::build(doc, root, config),
        };

        Some(Self {
            overlay,
            images: Vec::new(),
            state: ViewerState::default(),
        })
    }

    pub(crate) fn bind(
        &mut self,
        doc: &mut Document,
        root: NodeId,
        config: &EnhanceConfig,
        selectors: &CompiledSelectors,
        listeners: &mut Listeners,
    ) {
        let target = format!("#{}", config.ids.overlay);
        for image in doc.select_all(root, &selectors.images) {
            doc.set_style_property(image, "cursor", "pointer");
            doc.set_attr(image, "data-bs-toggle", "modal");
            doc.set_attr(image, "data-bs-target", &target);
            doc.set_attr(image, "role", "button");
            doc.set_attr(image, "aria-label", &config.strings.enlarge_image);
            doc.set_attr(image, "tabindex", "0");

            let node = EventTarget::Node(image);
            let clicked = listeners.add(node, EventKind::Click, Handler::InspectImage);
            let keyed = listeners.add(node, EventKind::KeyDown, Handler::InspectImageKey);
            if clicked || keyed {
                self.images.push(image);
            }
        }
        log::debug!("media inspector: {} images wired", self.images.len());
    }

    /// Show `image` in the overlay.
    pub(crate) fn activate(
        &mut self,
        doc: &mut Document,
        host: &mut dyn Host,
        selectors: &CompiledSelectors,
        image: NodeId,
    ) -> DisplayMode {
        let caption = doc
            .closest(image, &selectors.figure)
            .and_then(|figure| doc.select_first(figure, &selectors.caption))
            .map(|caption| doc.text_content(caption))
            .unwrap_or_default();

        self.state = ViewerState {
            source: doc.get_attr(image, "src").unwrap_or_default().to_string(),
            alt: doc.get_attr(image, "alt").unwrap_or_default().to_string(),
            caption,
        };

        let overlay = self.overlay;
        doc.set_attr(overlay.image, "src", &self.state.source);
        doc.set_attr(overlay.image, "alt", &self.state.alt);
        doc.set_text_content(overlay.title, &self.state.alt);
        doc.set_text_content(overlay.caption, &self.state.caption);

        match host.overlay_controller() {
            Some(controller) => {
                controller.show(doc, overlay.container);
                DisplayMode::Controller
            }
            None => {
                doc.set_style_property(overlay.container, "display", "block");
                DisplayMode::DirectVisibility
            }
        }
    }

    pub fn state(&self) -> &ViewerState {
        &self.state
    }

    /// The overlay's outermost element.
    pub fn overlay(&self) -> NodeId {
        self.overlay.container
    }

    pub fn images(&self) -> &[NodeId] {
        &self.images
    }
}
