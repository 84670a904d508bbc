//! End-to-end extraction behavior over synthetic CFDI documents.

use cfdix::{extract_batch, extract_bytes, Error, NamespaceProfile};

fn cfdi40(body: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<cfdi:Comprobante xmlns:cfdi="http://www.sat.gob.mx/cfd/4" Version="4.0"
    Folio="1001" Fecha="2024-05-01T12:00:00" Moneda="MXN" SubTotal="100.00" Total="116.00">
{body}
</cfdi:Comprobante>"#
    )
}

fn cfdi33(body: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<cfdi:Comprobante xmlns:cfdi="http://www.sat.gob.mx/cfd/3" Version="3.3"
    Folio="2002" Fecha="2020-01-15T08:30:00" Moneda="MXN" SubTotal="500.00" Total="580.00">
{body}
</cfdi:Comprobante>"#
    )
}

const PARTIES: &str = r#"  <cfdi:Emisor Rfc="EMI860101AA1" Nombre="Emisor SA"/>
  <cfdi:Receptor Rfc="REC900202BB2" Nombre="Receptor SA"/>"#;

#[test]
fn version_33_uses_cfd3_lookups() {
    let doc = cfdi33(
        r#"  <cfdi:Conceptos>
    <cfdi:Concepto Descripcion="Servicio" Importe="500.00"/>
  </cfdi:Conceptos>"#,
    );
    let result = extract_bytes(doc.as_bytes()).unwrap();
    assert_eq!(result.concepts.len(), 1);
    assert_eq!(result.concepts[0].descripcion, "Servicio");
    assert_eq!(result.header.folio, "2002");
}

#[test]
fn version_40_uses_cfd4_lookups() {
    let doc = cfdi40(
        r#"  <cfdi:Conceptos>
    <cfdi:Concepto Descripcion="Producto"/>
  </cfdi:Conceptos>"#,
    );
    let result = extract_bytes(doc.as_bytes()).unwrap();
    assert_eq!(result.concepts.len(), 1);
    assert_eq!(result.concepts[0].descripcion, "Producto");
}

#[test]
fn version_sniffing_is_substring_based() {
    // Flagged fragility, preserved on purpose: "4.3.3-beta" contains "3.3"
    // and therefore selects the 3.3 profile.
    assert_eq!(
        NamespaceProfile::from_version("4.3.3-beta"),
        NamespaceProfile::Cfd3
    );
}

#[test]
fn zero_concepts_is_not_an_error() {
    let doc = cfdi40(PARTIES);
    let result = extract_bytes(doc.as_bytes()).unwrap();
    assert!(result.concepts.is_empty());
    assert_eq!(result.header.folio, "1001");
    assert_eq!(result.header.fecha, "2024-05-01T12:00:00");
    assert_eq!(result.header.moneda, "MXN");
    assert_eq!(result.header.subtotal, "100.00");
    assert_eq!(result.header.total, "116.00");
    assert_eq!(result.header.rfc_emisor, "EMI860101AA1");
}

#[test]
fn missing_emisor_yields_empty_issuer_fields() {
    let doc = cfdi40(r#"  <cfdi:Receptor Rfc="REC900202BB2" Nombre="Receptor SA"/>"#);
    let result = extract_bytes(doc.as_bytes()).unwrap();
    assert_eq!(result.header.rfc_emisor, "");
    assert_eq!(result.header.nombre_emisor, "");
    assert_eq!(result.header.rfc_receptor, "REC900202BB2");
}

#[test]
fn parties_found_at_any_depth() {
    let doc = cfdi40(
        r#"  <cfdi:Wrapper>
    <cfdi:Emisor Rfc="DEEP010101AA1" Nombre="Anidado"/>
  </cfdi:Wrapper>"#,
    );
    let result = extract_bytes(doc.as_bytes()).unwrap();
    assert_eq!(result.header.rfc_emisor, "DEEP010101AA1");
}

#[test]
fn concept_rows_always_carry_all_nine_fields() {
    let doc = cfdi40(
        r#"  <cfdi:Conceptos>
    <cfdi:Concepto Cantidad="2" Importe="100.00"/>
  </cfdi:Conceptos>"#,
    );
    let result = extract_bytes(doc.as_bytes()).unwrap();
    let row = &result.concepts[0];
    let values = row.values();
    assert_eq!(values.len(), 9);
    assert_eq!(row.cantidad, "2");
    assert_eq!(row.importe, "100.00");
    // Every other field is present and empty.
    assert_eq!(
        values.iter().filter(|v| v.is_empty()).count(),
        7,
        "absent attributes must appear as empty strings"
    );
}

#[test]
fn concepts_keep_document_order() {
    let doc = cfdi40(
        r#"  <cfdi:Conceptos>
    <cfdi:Concepto NoIdentificacion="first"/>
    <cfdi:Concepto NoIdentificacion="second"/>
    <cfdi:Concepto NoIdentificacion="third"/>
  </cfdi:Conceptos>"#,
    );
    let result = extract_bytes(doc.as_bytes()).unwrap();
    let ids: Vec<&str> = result
        .concepts
        .iter()
        .map(|c| c.no_identificacion.as_str())
        .collect();
    assert_eq!(ids, ["first", "second", "third"]);
}

#[test]
fn malformed_document_is_the_only_hard_failure() {
    let err = extract_bytes(b"<cfdi:Comprobante><a></b></cfdi:Comprobante>").unwrap_err();
    assert!(matches!(err, Error::MalformedDocument(_)));
}

#[test]
fn round_trip_minimal_invoice() {
    let doc = format!(
        "{}\n",
        cfdi40(&format!(
            "{PARTIES}\n  <cfdi:Conceptos>\n    <cfdi:Concepto Cantidad=\"2\" Importe=\"100.00\"/>\n  </cfdi:Conceptos>"
        ))
    );
    let result = extract_bytes(doc.as_bytes()).unwrap();

    assert_eq!(result.concepts.len(), 1);
    assert_eq!(result.concepts[0].cantidad, "2");
    assert_eq!(result.concepts[0].importe, "100.00");
    assert_eq!(result.header.rfc_emisor, "EMI860101AA1");
    assert_eq!(result.header.rfc_receptor, "REC900202BB2");
}

#[test]
fn extraction_is_idempotent() {
    let doc = cfdi40(PARTIES);
    let first = extract_bytes(doc.as_bytes()).unwrap();
    let second = extract_bytes(doc.as_bytes()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn truncated_document_is_rejected_outright() {
    // Everything up to the cut parses, but the open root makes the document
    // malformed; no rows may survive it.
    let truncated = r#"<cfdi:Comprobante xmlns:cfdi="http://www.sat.gob.mx/cfd/4" Version="4.0" Folio="1"><cfdi:Conceptos><cfdi:Concepto Cantidad="9"/></cfdi:Conceptos>"#;
    let err = extract_bytes(truncated.as_bytes()).unwrap_err();
    assert!(matches!(err, Error::MalformedDocument(_)));
}

#[test]
fn batch_truncated_document_contributes_no_rows() {
    let good = cfdi40(r#"  <cfdi:Conceptos><cfdi:Concepto NoIdentificacion="ok"/></cfdi:Conceptos>"#);
    let truncated = r#"<cfdi:Comprobante xmlns:cfdi="http://www.sat.gob.mx/cfd/4" Version="4.0" Folio="1"><cfdi:Conceptos><cfdi:Concepto Cantidad="9"/></cfdi:Conceptos>"#;

    let docs = vec![good.into_bytes(), truncated.as_bytes().to_vec()];
    let batch = extract_batch(&docs);

    assert_eq!(batch.extracted_count(), 1);
    assert_eq!(batch.failures().len(), 1);
    assert_eq!(batch.failures()[0].0, 1);

    // Not even the concepts read before the cut may leak into the output.
    let ids: Vec<String> = batch
        .concept_rows()
        .iter()
        .map(|c| c.no_identificacion.clone())
        .collect();
    assert_eq!(ids, ["ok"]);
    assert_eq!(batch.header_rows().len(), 1);
    assert_eq!(batch.header_rows()[0].folio, "1001");
}

#[test]
fn batch_skips_malformed_document_and_keeps_order() {
    let good_a = cfdi40(
        r#"  <cfdi:Conceptos><cfdi:Concepto NoIdentificacion="a1"/></cfdi:Conceptos>"#,
    );
    let bad = "<Comprobante><open></close></Comprobante>".to_string();
    let good_b = cfdi33(
        r#"  <cfdi:Conceptos><cfdi:Concepto NoIdentificacion="b1"/></cfdi:Conceptos>"#,
    );

    let docs = vec![
        good_a.into_bytes(),
        bad.into_bytes(),
        good_b.into_bytes(),
    ];
    let batch = extract_batch(&docs);

    assert_eq!(batch.outcomes.len(), 3);
    assert_eq!(batch.extracted_count(), 2);
    assert_eq!(batch.failures().len(), 1);
    assert_eq!(batch.failures()[0].0, 1);

    let headers = batch.header_rows();
    assert_eq!(headers.len(), 2);
    assert_eq!(headers[0].folio, "1001");
    assert_eq!(headers[1].folio, "2002");

    let ids: Vec<String> = batch
        .concept_rows()
        .iter()
        .map(|c| c.no_identificacion.clone())
        .collect();
    assert_eq!(ids, ["a1", "b1"]);
}
