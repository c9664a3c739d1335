//! The in-memory record of one generation run.

use std::collections::BTreeMap;
use std::path::PathBuf;

/// Plugin formats understood by the downstream JUCE toolchain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PluginFormat {
    Au,
    Vst3,
    Standalone,
}

impl PluginFormat {
    pub const ALL: [PluginFormat; 3] = [
        PluginFormat::Au,
        PluginFormat::Vst3,
        PluginFormat::Standalone,
    ];

    pub fn label(self) -> &'static str {
        match self {
            PluginFormat::Au => "AU",
            PluginFormat::Vst3 => "VST3",
            PluginFormat::Standalone => "Standalone",
        }
    }

    /// Standalone is preselected in the wizard; the hosted formats are not.
    pub fn default_selected(self) -> bool {
        matches!(self, PluginFormat::Standalone)
    }
}

/// AU main type and VST3 category string derived from the behavior flags.
/// A synthesizer wins over a MIDI effect when both are set.
pub fn plugin_categories(is_synth: bool, is_midi_effect: bool) -> (&'static str, &'static str) {
    if is_synth {
        ("kAudioUnitType_MusicDevice", "Instrument|Synth")
    } else if is_midi_effect {
        ("kAudioUnitType_MIDIProcessor", "Fx|MIDI")
    } else {
        ("kAudioUnitType_Effect", "Fx")
    }
}

/// CMake-style boolean literal used in templates and the summary.
pub fn flag_label(value: bool) -> &'static str {
    if value {
        "TRUE"
    } else {
        "FALSE"
    }
}

/// Everything collected and derived for one run. Fully populated before any
/// file is written; never mutated after the summary is confirmed.
#[derive(Debug, Clone, Default)]
pub struct ProjectDescriptor {
    pub name: String,
    pub display_name: String,
    pub version: String,
    pub manufacturer_name: String,
    pub manufacturer_code: String,
    pub plugin_code: String,
    pub bundle_id: String,
    pub is_synth: bool,
    pub needs_midi_input: bool,
    pub needs_midi_output: bool,
    pub is_midi_effect: bool,
    pub au_main_type: &'static str,
    pub vst3_categories: &'static str,
    pub formats: Vec<PluginFormat>,
    pub destination_dir: String,
    pub project_dir: PathBuf,
}

impl ProjectDescriptor {
    pub fn formats_string(&self) -> String {
        self.formats
            .iter()
            .map(|f| f.label())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// The fixed placeholder vocabulary shared with the template set.
    pub fn template_fields(
        &self,
        vst3_folder: &str,
        juce_dir: &str,
    ) -> BTreeMap<&'static str, String> {
        let mut fields = BTreeMap::new();
        fields.insert("projectName", self.name.clone());
        fields.insert("projectDisplayName", self.display_name.clone());
        fields.insert("projectVersion", self.version.clone());
        fields.insert("manufacturerName", self.manufacturer_name.clone());
        fields.insert("manufacturerCode", self.manufacturer_code.clone());
        fields.insert("pluginCode", self.plugin_code.clone());
        fields.insert("pluginFormats", self.formats_string());
        fields.insert("isSynth", flag_label(self.is_synth).to_string());
        fields.insert("needsMidiInput", flag_label(self.needs_midi_input).to_string());
        fields.insert("needsMidiOutput", flag_label(self.needs_midi_output).to_string());
        fields.insert("isMidiEffect", flag_label(self.is_midi_effect).to_string());
        fields.insert("auMainType", self.au_main_type.to_string());
        fields.insert("vst3Categories", self.vst3_categories.to_string());
        fields.insert("bundleId", self.bundle_id.clone());
        fields.insert("customVst3Folder", vst3_folder.to_string());
        fields.insert("juceDir", juce_dir.to_string());
        fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synth_wins_over_midi_effect() {
        assert_eq!(
            plugin_categories(true, true),
            ("kAudioUnitType_MusicDevice", "Instrument|Synth")
        );
        assert_eq!(
            plugin_categories(true, false),
            ("kAudioUnitType_MusicDevice", "Instrument|Synth")
        );
    }

    #[test]
    fn test_midi_effect_categories() {
        assert_eq!(
            plugin_categories(false, true),
            ("kAudioUnitType_MIDIProcessor", "Fx|MIDI")
        );
    }

    #[test]
    fn test_plain_effect_categories() {
        assert_eq!(plugin_categories(false, false), ("kAudioUnitType_Effect", "Fx"));
    }

    #[test]
    fn test_formats_render_space_joined() {
        let descriptor = ProjectDescriptor {
            formats: vec![PluginFormat::Au, PluginFormat::Standalone],
            ..ProjectDescriptor::default()
        };
        assert_eq!(descriptor.formats_string(), "AU Standalone");
    }

    #[test]
    fn test_template_fields_cover_the_vocabulary() {
        let descriptor = ProjectDescriptor {
            name: "MyPlug".to_string(),
            display_name: "My Plug".to_string(),
            version: "1.0.0".to_string(),
            manufacturer_name: "My Company".to_string(),
            manufacturer_code: "Myco".to_string(),
            plugin_code: "Mypl".to_string(),
            bundle_id: "com.MyCompany.MyPlug".to_string(),
            au_main_type: "kAudioUnitType_Effect",
            vst3_categories: "Fx",
            formats: vec![PluginFormat::Standalone],
            ..ProjectDescriptor::default()
        };
        let fields = descriptor.template_fields("C:/VST3", "");
        for token in [
            "projectName",
            "projectDisplayName",
            "projectVersion",
            "manufacturerName",
            "manufacturerCode",
            "pluginCode",
            "pluginFormats",
            "isSynth",
            "needsMidiInput",
            "needsMidiOutput",
            "isMidiEffect",
            "auMainType",
            "vst3Categories",
            "bundleId",
            "customVst3Folder",
            "juceDir",
        ] {
            assert!(fields.contains_key(token), "missing field: {token}");
        }
        assert_eq!(fields["isSynth"], "FALSE");
        assert_eq!(fields["juceDir"], "");
    }
}
