//! Record export formats.
//!
//! The service picks a record representation from two query parameters,
//! `format` and `style`. [`ExportFormat`] names the combinations callers care
//! about and maps each one to its parameter pair through a fixed table:
//!
//! | selector     | `format` | `style`    |
//! |--------------|----------|------------|
//! | `rdf/ttl`    | `txt`    | `ttl`      |
//! | `yaml`       | `txt`    | -          |
//! | `rdf/xml`    | `rdfxml` | -          |
//! | `rdf/jsonld` | `json`   | `jsonld`   |
//! | `unimarc`    | `txt`    | `internal` |
//! | anything else| `json`   | -          |

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// A record representation offered by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ExportFormat {
    /// RDF serialised as Turtle
    RdfTurtle,
    /// YAML
    Yaml,
    /// RDF/XML
    RdfXml,
    /// RDF serialised as JSON-LD
    RdfJsonLd,
    /// UNIMARC in the service's internal text layout
    Unimarc,
    /// The service's native JSON (fallback for unknown selectors)
    #[default]
    Json,
}

impl ExportFormat {
    /// Every format, in table order.
    pub const ALL: [ExportFormat; 6] = [
        Self::RdfTurtle,
        Self::Yaml,
        Self::RdfXml,
        Self::RdfJsonLd,
        Self::Unimarc,
        Self::Json,
    ];

    /// Look up a caller-facing selector such as `"rdf/ttl"`.
    ///
    /// Unknown selectors fall back to [`ExportFormat::Json`].
    ///
    /// ```
    /// use cerl::ExportFormat;
    ///
    /// assert_eq!(ExportFormat::from_selector("yaml"), ExportFormat::Yaml);
    /// assert_eq!(ExportFormat::from_selector("bogus"), ExportFormat::Json);
    /// ```
    #[must_use]
    pub fn from_selector(selector: &str) -> Self {
        match selector {
            "rdf/ttl" => Self::RdfTurtle,
            "yaml" => Self::Yaml,
            "rdf/xml" => Self::RdfXml,
            "rdf/jsonld" => Self::RdfJsonLd,
            "unimarc" => Self::Unimarc,
            _ => Self::Json,
        }
    }

    /// The selector string for this format.
    #[must_use]
    pub const fn selector(&self) -> &'static str {
        match self {
            Self::RdfTurtle => "rdf/ttl",
            Self::Yaml => "yaml",
            Self::RdfXml => "rdf/xml",
            Self::RdfJsonLd => "rdf/jsonld",
            Self::Unimarc => "unimarc",
            Self::Json => "json",
        }
    }

    /// Value of the `format` query parameter.
    #[must_use]
    pub const fn representation(&self) -> &'static str {
        match self {
            Self::RdfTurtle | Self::Yaml | Self::Unimarc => "txt",
            Self::RdfXml => "rdfxml",
            Self::RdfJsonLd | Self::Json => "json",
        }
    }

    /// Value of the `style` query parameter, if one is sent.
    #[must_use]
    pub const fn style(&self) -> Option<&'static str> {
        match self {
            Self::RdfTurtle => Some("ttl"),
            Self::RdfJsonLd => Some("jsonld"),
            Self::Unimarc => Some("internal"),
            Self::Yaml | Self::RdfXml | Self::Json => None,
        }
    }

    /// The `(format, style)` request parameter pair.
    #[must_use]
    pub const fn request_params(&self) -> (&'static str, Option<&'static str>) {
        (self.representation(), self.style())
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.selector())
    }
}

impl FromStr for ExportFormat {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_selector(s))
    }
}
