//! Per-service endpoint tables.
//!
//! Each WSF service (fares, schedule, terminals, vessels) exposes a fixed
//! list of sub-paths. The tables below generate one `GET` method per
//! sub-path on a borrowed handle, e.g. `client.vessels().vessellocations(())`.

use std::fmt;
use std::str::FromStr;

use crate::endpoint::Params;

use super::client::WsfClient;
use super::outcome::Outcome;
use super::transport::Transport;

macro_rules! service_table {
    (
        $(#[$meta:meta])*
        $handle:ident, $accessor:ident, $table:ident, $name:literal,
        [$($path:ident),+ $(,)?]
    ) => {
        #[doc = concat!("Sub-paths of the `", $name, "` service.")]
        pub const $table: &[&str] = &[$(stringify!($path)),+];

        $(#[$meta])*
        #[derive(Debug)]
        pub struct $handle<'a, T> {
            client: &'a WsfClient<T>,
        }

        impl<T: Transport> $handle<'_, T> {
            /// Service name used for endpoint resolution.
            pub const SERVICE: &'static str = $name;

            /// `GET` an arbitrary sub-path of this service.
            pub async fn get(&self, path: &str, params: impl Into<Params>) -> Outcome {
                self.client.get(Self::SERVICE, path, params).await
            }

            /// `GET` a named sub-path from the table; `None` if the name is unknown.
            pub async fn call(&self, name: &str, params: impl Into<Params>) -> Option<Outcome> {
                if !$table.contains(&name) {
                    return None;
                }
                Some(self.get(name, params).await)
            }

            $(
                #[doc = concat!("`GET /", stringify!($path), "`")]
                pub async fn $path(&self, params: impl Into<Params>) -> Outcome {
                    self.get(stringify!($path), params).await
                }
            )+
        }

        impl<T: Transport> WsfClient<T> {
            #[doc = concat!("Endpoints of the `", $name, "` service.")]
            pub fn $accessor(&self) -> $handle<'_, T> {
                $handle { client: self }
            }
        }
    };
}

service_table!(
    /// Fares API handle.
    Fares, fares, FARES_PATHS, "fares",
    [
        cacheflushdate,
        validdaterange,
        terminals,
        terminalmates,
        terminalcombo,
        terminalcomboverbose,
        farelineitembasic,
        farelineitems,
        farelineitemsverbose,
        faretotals,
    ]
);

service_table!(
    /// Schedule API handle.
    Schedule, schedule, SCHEDULE_PATHS, "schedule",
    [
        cacheflushdate,
        validdaterange,
        terminals,
        terminalsandmates,
        terminalsandmatesbyroute,
        terminalmates,
        routes,
        routeshavingservicedisruptions,
        routedetails,
        activeseasons,
        schedroutes,
        sailings,
        timeadj,
        timeadjbyroute,
        timeadjbyschedroute,
        schedule,
        scheduletoday,
        alerts,
    ]
);

service_table!(
    /// Terminals API handle.
    Terminals, terminals, TERMINALS_PATHS, "terminals",
    [
        cacheflushdate,
        terminalbasics,
        terminalbulletins,
        terminallocations,
        terminalsailingspace,
        terminaltransports,
        terminalverbose,
        terminalwaittimes,
    ]
);

service_table!(
    /// Vessels API handle.
    Vessels, vessels, VESSELS_PATHS, "vessels",
    [
        cacheflushdate,
        vesselbasics,
        vesselaccomodations,
        vesselstats,
        vessellocations,
        vesselverbose,
    ]
);

/// One of the four WSF services.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Service {
    Fares,
    Schedule,
    Terminals,
    Vessels,
}

impl Service {
    /// All services.
    pub const ALL: [Service; 4] = [
        Service::Fares,
        Service::Schedule,
        Service::Terminals,
        Service::Vessels,
    ];

    /// Name used in the service map and URLs.
    pub fn name(self) -> &'static str {
        match self {
            Service::Fares => "fares",
            Service::Schedule => "schedule",
            Service::Terminals => "terminals",
            Service::Vessels => "vessels",
        }
    }

    /// Named sub-paths of this service.
    pub fn paths(self) -> &'static [&'static str] {
        match self {
            Service::Fares => FARES_PATHS,
            Service::Schedule => SCHEDULE_PATHS,
            Service::Terminals => TERMINALS_PATHS,
            Service::Vessels => VESSELS_PATHS,
        }
    }
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown service name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown service: {0}")]
pub struct UnknownService(String);

impl FromStr for Service {
    type Err = UnknownService;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Service::ALL
            .into_iter()
            .find(|service| service.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownService(s.to_string()))
    }
}
