use std::fmt;

use serde_derive::{Deserialize, Serialize};

/// A transit line that revenue can be attributed to.
///
/// Declaration order is the display order.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum Route {
    /// 淡海輕軌, Danhai light rail.
    Danhai,
    /// 安坑輕軌, Ankeng light rail.
    Ankeng,
    /// 環狀線, Circular line.
    Circular,
    /// 三鶯線, Sanying line.
    Sanying,
    /// 各線分攤, shared across lines when no line could be identified.
    Shared,
}

impl Route {
    pub const DISPLAY_ORDER: [Route; 5] = [
        Route::Danhai,
        Route::Ankeng,
        Route::Circular,
        Route::Sanying,
        Route::Shared,
    ];

    pub fn label(self) -> &'static str {
        use Route::*;
        match self {
            Danhai => "淡海輕軌",
            Ankeng => "安坑輕軌",
            Circular => "環狀線",
            Sanying => "三鶯線",
            Shared => "各線分攤",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        f.write_str(self.label())
    }
}
