//! The endpoint table.
//!
//! Each endpoint has a path template with positional placeholders (`{0}`,
//! `{1}`, ...) relative to the base URL, and the name of the record type its
//! responses decode into.

use std::fmt;

use super::error::ConfigurationError;

/// Static description of one endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EndpointDescriptor {
    /// Endpoint name, e.g. `lineStatus`.
    pub name: &'static str,
    /// Path template, e.g. `Line/{0}/Status`.
    pub template: &'static str,
    /// Record type name the response decodes into.
    pub model: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    StopPointsByLineId,
    LineMetaModes,
    LinesByLineId,
    LinesByMode,
    LineStatus,
    LineStatusBySeverity,
    LineStatusByMode,
    RouteByLineId,
    RouteByMode,
    RouteByLineIdWithDirection,
    LineDisruptionsByLineId,
    LineDisruptionsByMode,
    StopPointById,
    StopPointByMode,
    StopPointMetaModes,
    ArrivalsByLineId,
}

impl Endpoint {
    /// Every endpoint.
    pub const ALL: [Endpoint; 16] = [
        Endpoint::StopPointsByLineId,
        Endpoint::LineMetaModes,
        Endpoint::LinesByLineId,
        Endpoint::LinesByMode,
        Endpoint::LineStatus,
        Endpoint::LineStatusBySeverity,
        Endpoint::LineStatusByMode,
        Endpoint::RouteByLineId,
        Endpoint::RouteByMode,
        Endpoint::RouteByLineIdWithDirection,
        Endpoint::LineDisruptionsByLineId,
        Endpoint::LineDisruptionsByMode,
        Endpoint::StopPointById,
        Endpoint::StopPointByMode,
        Endpoint::StopPointMetaModes,
        Endpoint::ArrivalsByLineId,
    ];

    pub const fn descriptor(self) -> EndpointDescriptor {
        let (name, template, model) = match self {
            Endpoint::StopPointsByLineId => ("stopPointsByLineId", "Line/{0}/StopPoints", "StopPoint"),
            Endpoint::LineMetaModes => ("lineMetaModes", "Line/Meta/Modes", "Mode"),
            Endpoint::LinesByLineId => ("linesByLineId", "Line/{0}", "Line"),
            Endpoint::LinesByMode => ("linesByMode", "Line/Mode/{0}", "Line"),
            Endpoint::LineStatus => ("lineStatus", "Line/{0}/Status", "Line"),
            Endpoint::LineStatusBySeverity => ("lineStatusBySeverity", "Line/Status/{0}", "Line"),
            Endpoint::LineStatusByMode => ("lineStatusByMode", "Line/Mode/{0}/Status", "Line"),
            Endpoint::RouteByLineId => ("routeByLineId", "Line/{0}/Route", "Line"),
            Endpoint::RouteByMode => ("routeByMode", "Line/Mode/{0}/Route", "Line"),
            Endpoint::RouteByLineIdWithDirection => (
                "routeByLineIdWithDirection",
                "Line/{0}/Route/Sequence/{1}",
                "RouteSequence",
            ),
            Endpoint::LineDisruptionsByLineId => {
                ("lineDisruptionsByLineId", "Line/{0}/Disruption", "Disruption")
            }
            Endpoint::LineDisruptionsByMode => {
                ("lineDisruptionsByMode", "Line/Mode/{0}/Disruption", "Disruption")
            }
            Endpoint::StopPointById => ("stopPointById", "StopPoint/{0}", "StopPoint"),
            Endpoint::StopPointByMode => {
                ("stopPointByMode", "StopPoint/Mode/{0}", "StopPointsResponse")
            }
            Endpoint::StopPointMetaModes => ("stopPointMetaModes", "StopPoint/Meta/Modes", "Mode"),
            Endpoint::ArrivalsByLineId => ("arrivalsByLineId", "Line/{0}/Arrivals", "Prediction"),
        };
        EndpointDescriptor {
            name,
            template,
            model,
        }
    }

    pub fn name(self) -> &'static str {
        self.descriptor().name
    }

    /// Look up an endpoint by its name.
    pub fn from_name(name: &str) -> Option<Endpoint> {
        Self::ALL.into_iter().find(|e| e.name() == name)
    }

    /// Substitute positional arguments into the path template.
    ///
    /// Extra arguments are ignored. Each argument must be a single path
    /// segment: empty, `.`, `..` and anything containing `/`, `?`, `#` or `%`
    /// is rejected.
    ///
    /// ```
    /// use tfl_client::client::Endpoint;
    ///
    /// let path = Endpoint::RouteByLineIdWithDirection.url(&["northern", "all"]).unwrap();
    /// assert_eq!(path, "Line/northern/Route/Sequence/all");
    /// assert!(Endpoint::LineStatus.url(&[]).is_err());
    /// ```
    pub fn url(self, args: &[&str]) -> Result<String, ConfigurationError> {
        let template = self.descriptor().template;
        let malformed = || ConfigurationError::MalformedTemplate { template };

        let mut out = String::with_capacity(template.len());
        let mut rest = template;

        while let Some(open) = rest.find('{') {
            out.push_str(&rest[..open]);
            let after = &rest[open + 1..];
            let close = after.find('}').ok_or_else(malformed)?;
            let index: usize = after[..close].parse().map_err(|_| malformed())?;
            let arg = args
                .get(index)
                .ok_or(ConfigurationError::MissingUrlArgument { template, index })?;
            if !is_path_segment(arg) {
                return Err(ConfigurationError::InvalidUrlArgument {
                    template,
                    index,
                    value: arg.to_string(),
                });
            }
            out.push_str(arg);
            rest = &after[close + 1..];
        }

        if rest.contains('}') {
            return Err(malformed());
        }
        out.push_str(rest);

        Ok(out)
    }
}

fn is_path_segment(arg: &str) -> bool {
    !matches!(arg, "" | "." | "..") && !arg.contains(['/', '?', '#', '%'])
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Direction for route sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Inbound,
    Outbound,
    All,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Inbound => "inbound",
            Direction::Outbound => "outbound",
            Direction::All => "all",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn names_are_unique() {
        let names: HashSet<_> = Endpoint::ALL.iter().map(|e| e.name()).collect();
        assert_eq!(names.len(), Endpoint::ALL.len());
    }

    #[test]
    fn from_name_roundtrips() {
        for endpoint in Endpoint::ALL {
            assert_eq!(Endpoint::from_name(endpoint.name()), Some(endpoint));
        }
        assert_eq!(Endpoint::from_name("journeyResults"), None);
    }

    #[test]
    fn every_template_is_well_formed() {
        let args = ["a", "b"];
        for endpoint in Endpoint::ALL {
            let url = endpoint.url(&args).unwrap();
            assert!(!url.contains('{'), "{endpoint}: {url}");
        }
    }

    #[test]
    fn url_substitution() {
        assert_eq!(
            Endpoint::StopPointsByLineId.url(&["victoria"]).unwrap(),
            "Line/victoria/StopPoints"
        );
        assert_eq!(Endpoint::LineMetaModes.url(&[]).unwrap(), "Line/Meta/Modes");
        assert_eq!(Endpoint::LinesByMode.url(&["bus", "extra"]).unwrap(), "Line/Mode/bus");
    }

    #[test]
    fn missing_argument() {
        assert_eq!(
            Endpoint::RouteByLineIdWithDirection.url(&["northern"]),
            Err(ConfigurationError::MissingUrlArgument {
                template: "Line/{0}/Route/Sequence/{1}",
                index: 1,
            })
        );
    }

    #[test]
    fn argument_must_stay_in_its_segment() {
        for bad in ["victoria#x", "../StopPoint/940GZZLUVIC", "a/b", "x?y=1", "%2F", "..", ""] {
            assert_eq!(
                Endpoint::LineStatus.url(&[bad]),
                Err(ConfigurationError::InvalidUrlArgument {
                    template: "Line/{0}/Status",
                    index: 0,
                    value: bad.to_string(),
                }),
                "{bad:?}"
            );
        }
        assert_eq!(
            Endpoint::StopPointById.url(&["940GZZLUVIC"]).unwrap(),
            "StopPoint/940GZZLUVIC"
        );
        assert_eq!(
            Endpoint::LineStatusByMode.url(&["national-rail"]).unwrap(),
            "Line/Mode/national-rail/Status"
        );
    }

    #[test]
    fn models() {
        assert_eq!(Endpoint::StopPointByMode.descriptor().model, "StopPointsResponse");
        assert_eq!(Endpoint::ArrivalsByLineId.descriptor().model, "Prediction");
        assert_eq!(Endpoint::RouteByLineIdWithDirection.descriptor().model, "RouteSequence");
    }

    #[test]
    fn direction_strings() {
        assert_eq!(Direction::Inbound.to_string(), "inbound");
        assert_eq!(Direction::Outbound.as_str(), "outbound");
        assert_eq!(Direction::All.as_str(), "all");
    }
}
