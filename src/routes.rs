// src/routes.rs
//! Navigation targets. Pages receive the active route as a value.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    JobMatch,
    MatchScore,
    CareerChat,
}

impl Route {
    pub const ALL: [Route; 4] = [
        Route::Home,
        Route::JobMatch,
        Route::MatchScore,
        Route::CareerChat,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::JobMatch => "/job",
            Route::MatchScore => "/score",
            Route::CareerChat => "/chat",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Route::Home => "Home",
            Route::JobMatch => "Job Match",
            Route::MatchScore => "Match Score",
            Route::CareerChat => "Career Chat",
        }
    }

    pub fn from_path(path: &str) -> Option<Self> {
        let trimmed = path.trim_end_matches('/');
        Self::ALL.into_iter().find(|route| {
            route.path().trim_end_matches('/') == trimmed
        })
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Navigation bar line with the active route marked.
pub fn nav_bar(active: Route) -> String {
    Route::ALL
        .iter()
        .map(|&route| {
            if route == active {
                format!("[{}]", route.label())
            } else {
                route.label().to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("  ")
}
