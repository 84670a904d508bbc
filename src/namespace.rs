//! CFDI namespace profile selection.
//!
//! CFDI 3.3 and 4.0 documents carry the same element names under different
//! namespace URIs. The profile is chosen once per document by inspecting the
//! `Version` attribute on the root `Comprobante` element.

/// Namespace URI for CFDI 3.3 documents.
const CFD3_NAMESPACE: &str = "http://www.sat.gob.mx/cfd/3";

/// Namespace URI for CFDI 4.0 documents.
const CFD4_NAMESPACE: &str = "http://www.sat.gob.mx/cfd/4";

/// Namespace profile for a CFDI document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamespaceProfile {
    /// CFDI 3.3 (`http://www.sat.gob.mx/cfd/3`)
    Cfd3,
    /// CFDI 4.0 (`http://www.sat.gob.mx/cfd/4`)
    Cfd4,
}

impl NamespaceProfile {
    /// Select the profile from a root `Version` attribute value.
    ///
    /// A version string containing the substring `3.3` anywhere selects the
    /// 3.3 profile; everything else (including an empty or unrecognized
    /// version) selects the 4.0 profile. This is a substring match, not
    /// version parsing, and mirrors how real-world CFDI tooling sniffs the
    /// two versions in circulation.
    pub fn from_version(version: &str) -> Self {
        if version.contains("3.3") {
            NamespaceProfile::Cfd3
        } else {
            NamespaceProfile::Cfd4
        }
    }

    /// Returns the namespace URI this profile resolves elements against.
    pub fn uri(&self) -> &'static str {
        match self {
            NamespaceProfile::Cfd3 => CFD3_NAMESPACE,
            NamespaceProfile::Cfd4 => CFD4_NAMESPACE,
        }
    }

    /// Returns a short human-readable label for this profile.
    pub fn name(&self) -> &'static str {
        match self {
            NamespaceProfile::Cfd3 => "CFDI 3.3",
            NamespaceProfile::Cfd4 => "CFDI 4.0",
        }
    }
}

impl std::fmt::Display for NamespaceProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_cfd3() {
        assert_eq!(NamespaceProfile::from_version("3.3"), NamespaceProfile::Cfd3);
        assert_eq!(
            NamespaceProfile::from_version("CFDI 3.3"),
            NamespaceProfile::Cfd3
        );
    }

    #[test]
    fn test_select_cfd4() {
        assert_eq!(NamespaceProfile::from_version("4.0"), NamespaceProfile::Cfd4);
        assert_eq!(NamespaceProfile::from_version(""), NamespaceProfile::Cfd4);
        assert_eq!(NamespaceProfile::from_version("2.2"), NamespaceProfile::Cfd4);
    }

    #[test]
    fn test_substring_semantics() {
        // Substring sniffing, warts and all: any "3.3" occurrence wins.
        assert_eq!(
            NamespaceProfile::from_version("4.3.3-beta"),
            NamespaceProfile::Cfd3
        );
    }

    #[test]
    fn test_uri() {
        assert_eq!(NamespaceProfile::Cfd3.uri(), "http://www.sat.gob.mx/cfd/3");
        assert_eq!(NamespaceProfile::Cfd4.uri(), "http://www.sat.gob.mx/cfd/4");
    }

    #[test]
    fn test_display() {
        assert_eq!(NamespaceProfile::Cfd3.to_string(), "CFDI 3.3");
        assert_eq!(NamespaceProfile::Cfd4.to_string(), "CFDI 4.0");
    }
}
