//! Row structures for line items and invoice headers.

use serde::{Deserialize, Serialize};

/// Column names of a [`ConceptRow`], in their fixed output order.
pub const CONCEPT_COLUMNS: [&str; 9] = [
    "ClaveProdServ",
    "NoIdentificacion",
    "Cantidad",
    "ClaveUnidad",
    "Unidad",
    "Descripcion",
    "ValorUnitario",
    "Importe",
    "ObjetoImp",
];

/// Column names of a [`HeaderRow`], in their fixed output order.
pub const HEADER_COLUMNS: [&str; 9] = [
    "Folio",
    "Fecha",
    "Moneda",
    "Subtotal",
    "Total",
    "RFC Emisor",
    "Nombre Emisor",
    "RFC Receptor",
    "Nombre Receptor",
];

/// One invoice line item (`Concepto` element).
///
/// Every field is always present; an attribute missing from the source
/// element yields an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConceptRow {
    /// Product/service catalog code (`ClaveProdServ`).
    pub clave_prod_serv: String,
    /// Issuer-internal item identifier (`NoIdentificacion`).
    pub no_identificacion: String,
    /// Quantity (`Cantidad`).
    pub cantidad: String,
    /// Unit-of-measure catalog code (`ClaveUnidad`).
    pub clave_unidad: String,
    /// Free-form unit label (`Unidad`).
    pub unidad: String,
    /// Line item description (`Descripcion`).
    pub descripcion: String,
    /// Unit value (`ValorUnitario`).
    pub valor_unitario: String,
    /// Line amount (`Importe`).
    pub importe: String,
    /// Tax-object flag (`ObjetoImp`).
    pub objeto_imp: String,
}

impl ConceptRow {
    /// Field values in [`CONCEPT_COLUMNS`] order.
    pub fn values(&self) -> [&str; 9] {
        [
            &self.clave_prod_serv,
            &self.no_identificacion,
            &self.cantidad,
            &self.clave_unidad,
            &self.unidad,
            &self.descripcion,
            &self.valor_unitario,
            &self.importe,
            &self.objeto_imp,
        ]
    }
}

/// Invoice-level data: root `Comprobante` attributes plus the issuer and
/// recipient parties.
///
/// As with [`ConceptRow`], absent attributes or absent `Emisor`/`Receptor`
/// elements yield empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderRow {
    /// Invoice folio number (`Folio`).
    pub folio: String,
    /// Issue date (`Fecha`).
    pub fecha: String,
    /// Currency code (`Moneda`).
    pub moneda: String,
    /// Subtotal before taxes (`SubTotal`).
    pub subtotal: String,
    /// Grand total (`Total`).
    pub total: String,
    /// Issuer tax ID (`Emisor/@Rfc`).
    pub rfc_emisor: String,
    /// Issuer name (`Emisor/@Nombre`).
    pub nombre_emisor: String,
    /// Recipient tax ID (`Receptor/@Rfc`).
    pub rfc_receptor: String,
    /// Recipient name (`Receptor/@Nombre`).
    pub nombre_receptor: String,
}

impl HeaderRow {
    /// Field values in [`HEADER_COLUMNS`] order.
    pub fn values(&self) -> [&str; 9] {
        [
            &self.folio,
            &self.fecha,
            &self.moneda,
            &self.subtotal,
            &self.total,
            &self.rfc_emisor,
            &self.nombre_emisor,
            &self.rfc_receptor,
            &self.nombre_receptor,
        ]
    }
}
