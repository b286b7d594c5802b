//! Minimal stanza model: element trees, IQ envelopes, and error conditions.
//!
//! The transport layer owns real XML parsing and serialization; handlers
//! only need the tree shape, so this stays a plain owned structure.

use channelpush_core::types::to_bare;

/// Namespace of standard stanza error conditions.
const STANZAS_NS: &str = "urn:ietf:params:xml:ns:xmpp-stanzas";

/// An owned element tree node: name, attributes, text, children.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    name: String,
    attrs: Vec<(String, String)>,
    text: String,
    children: Vec<Element>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.push((name.into(), value.into()));
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    pub fn add_child(&mut self, child: Element) {
        self.children.push(child);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// First child with the given name, if any.
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }

    pub fn children(&self) -> &[Element] {
        &self.children
    }
}

/// IQ request/response type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IqType {
    Get,
    Set,
    Result,
    Error,
}

/// Protocol error conditions this component produces. No other categories
/// originate here; transport-level errors belong to the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCondition {
    /// The request shape is not recognized / the feature is not offered.
    FeatureNotImplemented,
    /// A storage fault; the caller must resubmit.
    InternalServerError,
}

impl ErrorCondition {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCondition::FeatureNotImplemented => "feature-not-implemented",
            ErrorCondition::InternalServerError => "internal-server-error",
        }
    }
}

/// A stanza-level error, always of type `cancel`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StanzaError {
    pub condition: ErrorCondition,
}

impl StanzaError {
    /// Render as the standard `<error type="cancel">` element for the
    /// transport to serialize.
    pub fn to_element(self) -> Element {
        Element::new("error")
            .with_attr("type", "cancel")
            .with_child(Element::new(self.condition.as_str()).with_attr("xmlns", STANZAS_NS))
    }
}

/// An IQ envelope around a single payload element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Iq {
    pub from: String,
    pub to: String,
    pub id: String,
    pub kind: IqType,
    pub payload: Option<Element>,
    pub error: Option<StanzaError>,
}

impl Iq {
    /// Build a request stanza (used by the transport layer and tests).
    pub fn request(
        kind: IqType,
        from: impl Into<String>,
        to: impl Into<String>,
        id: impl Into<String>,
        payload: Element,
    ) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            id: id.into(),
            kind,
            payload: Some(payload),
            error: None,
        }
    }

    /// The sender's bare address; preference rows are keyed by this.
    pub fn from_bare(&self) -> &str {
        to_bare(&self.from)
    }

    /// Namespace of the payload element, used for handler dispatch.
    pub fn namespace(&self) -> Option<&str> {
        self.payload.as_ref().and_then(|p| p.attr("xmlns"))
    }

    /// Build the result stanza for a request: addresses swapped, same id.
    pub fn result_of(request: &Iq, payload: Option<Element>) -> Iq {
        Iq {
            from: request.to.clone(),
            to: request.from.clone(),
            id: request.id.clone(),
            kind: IqType::Result,
            payload,
            error: None,
        }
    }

    /// Build the error stanza for a request with the given condition.
    pub fn error_of(request: &Iq, condition: ErrorCondition) -> Iq {
        Iq {
            from: request.to.clone(),
            to: request.from.clone(),
            id: request.id.clone(),
            kind: IqType::Error,
            payload: None,
            error: Some(StanzaError { condition }),
        }
    }
}
