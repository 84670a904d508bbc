//! CFDI parser implementation.

use crate::error::{Error, Result};
use crate::model::{ConceptRow, ExtractionResult, HeaderRow};
use crate::namespace::NamespaceProfile;
use std::collections::HashMap;

use quick_xml::events::{BytesStart, Event};
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::reader::NsReader;

/// Parser for CFDI invoice documents.
///
/// Walks the document once with a namespace-resolving reader, harvesting the
/// root `Comprobante` attributes, every `Concepto` in document order, and the
/// first `Emisor`/`Receptor` found at any depth.
pub struct CfdiParser<'a> {
    data: &'a [u8],
}

impl<'a> CfdiParser<'a> {
    /// Create a parser over raw document bytes.
    pub fn from_bytes(data: &'a [u8]) -> Self {
        Self { data }
    }

    /// Parse the document into concepts plus one header row.
    ///
    /// Fails with [`Error::MalformedDocument`] only when the bytes are not
    /// well-formed XML: unparseable syntax, a truncated document whose
    /// elements are still open at end of input, or content after the root
    /// element closes. A document with no `Concepto`, `Emisor`, or
    /// `Receptor` elements is still valid and yields empty rows/fields.
    ///
    /// The namespace profile is chosen from the root `Version` attribute and
    /// drives element lookups only; the root's own namespace is not
    /// validated.
    pub fn parse(&self) -> Result<ExtractionResult> {
        let mut reader = NsReader::from_reader(self.data);
        reader.config_mut().trim_text(true);

        let mut buf = Vec::new();
        let mut state = DocumentState::default();
        let mut depth = 0usize;
        let mut root_done = false;

        loop {
            match reader.read_resolved_event_into(&mut buf) {
                Ok((ns, Event::Start(ref e))) => {
                    if root_done {
                        return Err(Error::MalformedDocument(
                            "content after document root".to_string(),
                        ));
                    }
                    state.element(&ns, e);
                    depth += 1;
                }
                Ok((ns, Event::Empty(ref e))) => {
                    if root_done {
                        return Err(Error::MalformedDocument(
                            "content after document root".to_string(),
                        ));
                    }
                    state.element(&ns, e);
                    if depth == 0 {
                        root_done = true;
                    }
                }
                Ok((_, Event::End(_))) => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        root_done = true;
                    }
                }
                Ok((_, Event::Text(_))) | Ok((_, Event::CData(_))) => {
                    // trim_text suppresses whitespace-only text, so anything
                    // surviving outside the root is stray content.
                    if depth == 0 {
                        return Err(Error::MalformedDocument(
                            "text outside document root".to_string(),
                        ));
                    }
                }
                Ok((_, Event::Eof)) => {
                    if depth > 0 {
                        return Err(Error::MalformedDocument(
                            "unexpected end of document".to_string(),
                        ));
                    }
                    break;
                }
                Err(e) => return Err(Error::MalformedDocument(e.to_string())),
                _ => {}
            }
            buf.clear();
        }

        if state.profile.is_none() {
            return Err(Error::MalformedDocument("no root element".to_string()));
        }

        Ok(ExtractionResult {
            concepts: state.concepts,
            header: state.header,
        })
    }
}

/// Accumulated extraction state while walking the event stream.
#[derive(Default)]
struct DocumentState {
    profile: Option<NamespaceProfile>,
    header: HeaderRow,
    concepts: Vec<ConceptRow>,
    issuer_seen: bool,
    recipient_seen: bool,
}

impl DocumentState {
    fn element(&mut self, ns: &ResolveResult, e: &BytesStart) {
        match self.profile {
            None => {
                // Root element: pick the profile and read the invoice-level
                // attributes off it.
                let attrs = attribute_map(e);
                let selected = NamespaceProfile::from_version(field(&attrs, "Version"));
                tracing::debug!(profile = %selected, "namespace profile selected");

                self.header.folio = field(&attrs, "Folio").to_string();
                self.header.fecha = field(&attrs, "Fecha").to_string();
                self.header.moneda = field(&attrs, "Moneda").to_string();
                self.header.subtotal = field(&attrs, "SubTotal").to_string();
                self.header.total = field(&attrs, "Total").to_string();
                self.profile = Some(selected);
            }
            Some(selected) if namespace_matches(ns, selected) => {
                match e.local_name().as_ref() {
                    b"Concepto" => {
                        let attrs = attribute_map(e);
                        self.concepts.push(concept_row(&attrs));
                    }
                    b"Emisor" if !self.issuer_seen => {
                        let attrs = attribute_map(e);
                        self.header.rfc_emisor = field(&attrs, "Rfc").to_string();
                        self.header.nombre_emisor = field(&attrs, "Nombre").to_string();
                        self.issuer_seen = true;
                    }
                    b"Receptor" if !self.recipient_seen => {
                        let attrs = attribute_map(e);
                        self.header.rfc_receptor = field(&attrs, "Rfc").to_string();
                        self.header.nombre_receptor = field(&attrs, "Nombre").to_string();
                        self.recipient_seen = true;
                    }
                    _ => {}
                }
            }
            // Element outside the selected namespace.
            Some(_) => {}
        }
    }
}

/// Collect an element's attributes into a name → unescaped value map.
fn attribute_map(e: &BytesStart) -> HashMap<String, String> {
    let mut map = HashMap::new();
    for attr in e.attributes().flatten() {
        let key = String::from_utf8_lossy(attr.key.as_ref()).to_string();
        let value = attr.unescape_value().unwrap_or_default().to_string();
        map.insert(key, value);
    }
    map
}

/// Look up an attribute, absent keys resolving to the empty string.
fn field<'m>(map: &'m HashMap<String, String>, key: &str) -> &'m str {
    map.get(key).map(String::as_str).unwrap_or("")
}

fn namespace_matches(ns: &ResolveResult, profile: NamespaceProfile) -> bool {
    matches!(ns, ResolveResult::Bound(Namespace(uri)) if *uri == profile.uri().as_bytes())
}

/// Build a line-item row from a `Concepto` attribute set. All nine fields are
/// always populated, missing attributes as "".
fn concept_row(attrs: &HashMap<String, String>) -> ConceptRow {
    ConceptRow {
        clave_prod_serv: field(attrs, "ClaveProdServ").to_string(),
        no_identificacion: field(attrs, "NoIdentificacion").to_string(),
        cantidad: field(attrs, "Cantidad").to_string(),
        clave_unidad: field(attrs, "ClaveUnidad").to_string(),
        unidad: field(attrs, "Unidad").to_string(),
        descripcion: field(attrs, "Descripcion").to_string(),
        valor_unitario: field(attrs, "ValorUnitario").to_string(),
        importe: field(attrs, "Importe").to_string(),
        objeto_imp: field(attrs, "ObjetoImp").to_string(),
    }
}
