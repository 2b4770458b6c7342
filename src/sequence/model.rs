use crate::foundation::error::{ScanlensError, ScanlensResult};

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
/// Complete configuration of the greeting sequence.
///
/// A pure data model: build it programmatically, take the defaults, or load it
/// from JSON. Every duration is in seconds and every act samples them against
/// the injected clock, so the same config renders identically offline and live.
pub struct SequenceConfig {
    /// Display name substituted into the finale; `None` falls back to FRIEND.
    #[serde(default)]
    pub display_name: Option<String>,
    /// Deterministic seed for every jittered choice in the sequence.
    #[serde(default)]
    pub seed: u64,
    /// Boot act configuration.
    #[serde(default)]
    pub boot: BootConfig,
    /// Scanning-lens act configuration.
    #[serde(default)]
    pub scan: ScanConfig,
    /// Purge act configuration.
    #[serde(default)]
    pub purge: PurgeConfig,
    /// Download act configuration.
    #[serde(default)]
    pub download: DownloadConfig,
    /// Install act configuration.
    #[serde(default)]
    pub install: InstallConfig,
    /// Finale act configuration.
    #[serde(default)]
    pub finale: FinaleConfig,
}

impl Default for SequenceConfig {
    fn default() -> Self {
        Self {
            display_name: None,
            seed: 0,
            boot: BootConfig::default(),
            scan: ScanConfig::default(),
            purge: PurgeConfig::default(),
            download: DownloadConfig::default(),
            install: InstallConfig::default(),
            finale: FinaleConfig::default(),
        }
    }
}

impl SequenceConfig {
    /// Load a configuration from a JSON string.
    pub fn from_json_str(json: &str) -> ScanlensResult<Self> {
        let cfg: Self =
            serde_json::from_str(json).map_err(|e| ScanlensError::serde(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Finale name: uppercased display name, or FRIEND.
    pub fn resolved_name(&self) -> String {
        match self.display_name.as_deref() {
            Some(s) if !s.trim().is_empty() => s.trim().to_uppercase(),
            _ => "FRIEND".to_owned(),
        }
    }

    /// Validate the full configuration.
    pub fn validate(&self) -> ScanlensResult<()> {
        self.boot.validate()?;
        self.scan.validate()?;
        self.purge.validate()?;
        self.download.validate()?;
        self.install.validate()?;
        self.finale.validate()?;
        Ok(())
    }
}

fn require_positive(value: f64, field: &str) -> ScanlensResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ScanlensError::validation(format!(
            "{field} must be finite and > 0"
        )));
    }
    Ok(())
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
/// Typewriter boot log.
pub struct BootConfig {
    /// Lines typed out in order.
    pub lines: Vec<String>,
    /// Seconds per typed character.
    pub char_secs: f64,
    /// Hold after the last character before completing.
    pub hold_secs: f64,
    /// Font size in pixels.
    pub size_px: f32,
    /// Text color.
    pub color: [u8; 4],
}

impl Default for BootConfig {
    fn default() -> Self {
        Self {
            lines: vec![
                "> INITIALIZING NEW_YEAR.EXE...".to_owned(),
                "> LOADING CELEBRATION PROTOCOL...".to_owned(),
                "> ████████████████ 100%".to_owned(),
            ],
            char_secs: 0.04,
            hold_secs: 0.8,
            size_px: 28.0,
            color: [0x00, 0xFF, 0x94, 0xFF],
        }
    }
}

impl BootConfig {
    /// Validate boot invariants.
    pub fn validate(&self) -> ScanlensResult<()> {
        if self.lines.is_empty() {
            return Err(ScanlensError::validation("boot lines must be non-empty"));
        }
        require_positive(self.char_secs, "boot char_secs")?;
        require_positive(self.hold_secs, "boot hold_secs")?;
        Ok(())
    }
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
/// Scanning-lens act over a short multi-line prompt.
pub struct ScanConfig {
    /// Prompt text; `'\n'` separates the scanned lines.
    pub text: String,
    /// Seconds to sweep one line.
    pub scan_secs: f64,
    /// Seconds to jump between lines.
    pub jump_secs: f64,
    /// Full line cycles before the act completes.
    pub cycles: u32,
    /// Lens radius in pixels.
    pub radius_px: f64,
    /// Lens bulge exponent.
    pub intensity: f64,
    /// Font size in pixels.
    pub size_px: f32,
    /// Text color.
    pub color: [u8; 4],
    /// Glow halo radius in pixels (0 disables).
    pub glow_radius_px: u32,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            text: "DELETE\n2025?".to_owned(),
            scan_secs: 2.0,
            jump_secs: 0.3,
            cycles: 2,
            radius_px: 250.0,
            intensity: 2.5,
            size_px: 120.0,
            color: [0x00, 0xFF, 0x88, 0xFF],
            glow_radius_px: 20,
        }
    }
}

impl ScanConfig {
    /// Number of lines in the prompt.
    pub fn line_count(&self) -> usize {
        self.text.split('\n').count()
    }

    /// Validate scan invariants.
    pub fn validate(&self) -> ScanlensResult<()> {
        if self.text.is_empty() {
            return Err(ScanlensError::validation("scan text must be non-empty"));
        }
        require_positive(self.scan_secs, "scan scan_secs")?;
        require_positive(self.jump_secs, "scan jump_secs")?;
        if self.cycles == 0 {
            return Err(ScanlensError::validation("scan cycles must be > 0"));
        }
        require_positive(self.radius_px, "scan radius_px")?;
        if !self.intensity.is_finite() || self.intensity < 1.0 {
            return Err(ScanlensError::validation(
                "scan intensity must be finite and >= 1",
            ));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
/// Step texts blown up by the center lens while a purge counter runs.
pub struct PurgeConfig {
    /// Step texts shown in order; `'\n'` separates lines within a step.
    pub steps: Vec<String>,
    /// Seconds each step stays up.
    pub step_secs: f64,
    /// Seconds per percent of purge progress.
    pub percent_secs: f64,
    /// Hold after the last step before the explosion.
    pub final_hold_secs: f64,
    /// Lens bulge exponent.
    pub intensity: f64,
    /// Font size in pixels.
    pub size_px: f32,
    /// Text color.
    pub color: [u8; 4],
    /// Apply seeded glitch substitution to step texts.
    pub glitch: bool,
}

impl Default for PurgeConfig {
    fn default() -> Self {
        Self {
            steps: vec![
                "DELETING\nMEMORIES".to_owned(),
                "PURGING\nTRENDS".to_owned(),
                "REMOVING\nCRINGE".to_owned(),
                "CLEARING\nEXES".to_owned(),
                "FORMATTING\n2025".to_owned(),
            ],
            step_secs: 1.2,
            percent_secs: 0.04,
            final_hold_secs: 1.0,
            intensity: 2.5,
            size_px: 180.0,
            color: [0xEF, 0x44, 0x44, 0xFF],
            glitch: true,
        }
    }
}

impl PurgeConfig {
    /// Validate purge invariants.
    pub fn validate(&self) -> ScanlensResult<()> {
        if self.steps.is_empty() {
            return Err(ScanlensError::validation("purge steps must be non-empty"));
        }
        require_positive(self.step_secs, "purge step_secs")?;
        require_positive(self.percent_secs, "purge percent_secs")?;
        require_positive(self.final_hold_secs, "purge final_hold_secs")?;
        Ok(())
    }
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
/// Hyperspeed download with switching titles.
pub struct DownloadConfig {
    /// Candidate download titles.
    pub titles: Vec<String>,
    /// Seconds per progress tick.
    pub tick_secs: f64,
    /// Percent gained per tick.
    pub percent_per_tick: f64,
    /// Probability of switching the title on any tick.
    pub switch_probability: f64,
    /// Lens bulge exponent.
    pub intensity: f64,
    /// Font size in pixels.
    pub size_px: f32,
    /// Text color.
    pub color: [u8; 4],
    /// Hold after 100% before completing.
    pub done_hold_secs: f64,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            titles: vec![
                "NEW_MEMORIES.EXE".to_owned(),
                "BETTER_DECISIONS.DLL".to_owned(),
                "UNLIMITED_COFFEE.JAR".to_owned(),
                "NO_MORE_MONDAYS.SYS".to_owned(),
                "GOOD_VIBES_ONLY.ZIP".to_owned(),
                "FINANCIAL_STABILITY.APK".to_owned(),
                "GYM_MOTIVATION.BAT".to_owned(),
                "CLEAR_SKIN.PATCH".to_owned(),
                "LUCK_V2.0.PKG".to_owned(),
            ],
            tick_secs: 0.08,
            percent_per_tick: 1.5,
            switch_probability: 0.3,
            intensity: 3.0,
            size_px: 100.0,
            color: [0x00, 0xFF, 0xFF, 0xFF],
            done_hold_secs: 1.0,
        }
    }
}

impl DownloadConfig {
    /// Validate download invariants.
    pub fn validate(&self) -> ScanlensResult<()> {
        if self.titles.is_empty() {
            return Err(ScanlensError::validation(
                "download titles must be non-empty",
            ));
        }
        require_positive(self.tick_secs, "download tick_secs")?;
        require_positive(self.percent_per_tick, "download percent_per_tick")?;
        if !(0.0..=1.0).contains(&self.switch_probability) {
            return Err(ScanlensError::validation(
                "download switch_probability must be within [0, 1]",
            ));
        }
        require_positive(self.done_hold_secs, "download done_hold_secs")?;
        Ok(())
    }
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
/// Installer popups spawned at jittered positions.
pub struct InstallConfig {
    /// Popup task texts spawned in order.
    pub tasks: Vec<String>,
    /// Seconds between popup spawns.
    pub spawn_secs: f64,
    /// Hold after the last popup before completing.
    pub tail_secs: f64,
    /// Popup position jitter, in percent of the surface around its center.
    pub jitter_pct: f64,
    /// Footer line staged while popups spawn.
    pub footer: String,
}

impl Default for InstallConfig {
    fn default() -> Self {
        Self {
            tasks: vec![
                "Installing happiness modules...".to_owned(),
                "Configuring success parameters...".to_owned(),
                "Updating friendship drivers...".to_owned(),
                "Optimizing luck algorithms...".to_owned(),
                "Patching bad habits...".to_owned(),
                "Calibrating aura...".to_owned(),
                "Deleting cringe...".to_owned(),
            ],
            spawn_secs: 0.5,
            tail_secs: 2.0,
            jitter_pct: 20.0,
            footer: "DO NOT TURN OFF YOUR REALITY...".to_owned(),
        }
    }
}

impl InstallConfig {
    /// Validate install invariants.
    pub fn validate(&self) -> ScanlensResult<()> {
        if self.tasks.is_empty() {
            return Err(ScanlensError::validation("install tasks must be non-empty"));
        }
        require_positive(self.spawn_secs, "install spawn_secs")?;
        require_positive(self.tail_secs, "install tail_secs")?;
        if !self.jitter_pct.is_finite() || self.jitter_pct < 0.0 {
            return Err(ScanlensError::validation(
                "install jitter_pct must be finite and >= 0",
            ));
        }
        Ok(())
    }
}

#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
/// Reveal, search, and boom timeline closing the sequence.
pub struct FinaleConfig {
    /// Seconds the reveal step stays up.
    pub reveal_secs: f64,
    /// Seconds the search step stays up.
    pub search_secs: f64,
    /// Optional bounded tail after the boom; `None` runs until replayed.
    #[serde(default)]
    pub hold_secs: Option<f64>,
    /// Font size in pixels.
    pub size_px: f32,
    /// Text color.
    pub color: [u8; 4],
}

impl Default for FinaleConfig {
    fn default() -> Self {
        Self {
            reveal_secs: 4.0,
            search_secs: 3.0,
            hold_secs: None,
            size_px: 96.0,
            color: [0xFF, 0xFF, 0xFF, 0xFF],
        }
    }
}

impl FinaleConfig {
    /// Validate finale invariants.
    pub fn validate(&self) -> ScanlensResult<()> {
        require_positive(self.reveal_secs, "finale reveal_secs")?;
        require_positive(self.search_secs, "finale search_secs")?;
        if let Some(hold) = self.hold_secs {
            require_positive(hold, "finale hold_secs")?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sequence/model.rs"]
mod tests;
