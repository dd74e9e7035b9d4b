use std::fmt;

/// Ephemeris in the UDL NASA text layout, keyed by the NORAD catalog ID.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UdlReport {
    pub id: String,
    pub entries: Vec<UdlEntry>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UdlEntry {
    /// `YYDDDHHMMSS.sss`
    pub timestamp: String,
    pub position: UdlPosition,
    pub velocity: UdlVelocity,
}

/// km
#[derive(Debug, Clone, PartialEq)]
pub struct UdlPosition {
    pub x: String,
    pub y: String,
    pub z: String,
}

/// km/s
#[derive(Debug, Clone, PartialEq)]
pub struct UdlVelocity {
    pub x: String,
    pub y: String,
    pub z: String,
}

impl fmt::Display for UdlReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for e in &self.entries {
            writeln!(
                f,
                "{} {} {} {} {} {} {}",
                e.timestamp,
                e.position.x,
                e.position.y,
                e.position.z,
                e.velocity.x,
                e.velocity.y,
                e.velocity.z
            )?;
        }
        Ok(())
    }
}
