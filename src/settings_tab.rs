//! The plugin's settings tab, described as data for the host to draw.

use crate::error::SettingsError;
use crate::host::SettingsStore;
use crate::models::Settings;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlValue {
    Toggle(bool),
    /// Multi-line text area.
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingControl {
    pub name: &'static str,
    pub description: &'static str,
    pub value: ControlValue,
}

/// A user edit coming back from one of the controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingChange {
    HideAttachments(bool),
    OpenOnStartup(bool),
    /// Raw text area content, one folder name per line.
    AttachmentFolders(String),
    ShowRootNav(bool),
}

pub fn controls(settings: &Settings) -> Vec<SettingControl> {
    vec![
        SettingControl {
            name: "Hide attachments folders",
            description: "Hide folders listed below from the file tree",
            value: ControlValue::Toggle(settings.hide_attachments),
        },
        SettingControl {
            name: "Open on startup",
            description: "Open the file tree when the app starts",
            value: ControlValue::Toggle(settings.open_on_startup),
        },
        SettingControl {
            name: "Attachment folders",
            description: "Folder names to hide, one per line",
            value: ControlValue::Text(settings.attachment_folders.join("\n")),
        },
        SettingControl {
            name: "Show Root navigation",
            description: "Show a Root button in the navigation bar",
            value: ControlValue::Toggle(settings.show_root_nav),
        },
    ]
}

/// Splits the attachment folder text area into trimmed, non-empty names.
pub fn parse_attachment_folders(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Persists `change`. Returns whether open panels need to be redrawn.
pub fn apply_change(store: &dyn SettingsStore, change: SettingChange) -> Result<bool, SettingsError> {
    log::debug!("Settings change {:?}", change);
    let needs_refresh = !matches!(change, SettingChange::OpenOnStartup(_));
    let mut pending = Some(change);
    store.update_settings(&mut |settings| match pending.take() {
        Some(SettingChange::HideAttachments(v)) => settings.hide_attachments = v,
        Some(SettingChange::OpenOnStartup(v)) => settings.open_on_startup = v,
        Some(SettingChange::AttachmentFolders(text)) => {
            settings.attachment_folders = parse_attachment_folders(&text)
        }
        Some(SettingChange::ShowRootNav(v)) => settings.show_root_nav = v,
        None => {}
    })?;
    Ok(needs_refresh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{SettingsManager, SETTINGS_FILE};
    use proptest::prelude::*;
    use tempfile::tempdir;

    #[test]
    fn test_controls_reflect_settings() {
        let settings = Settings {
            hide_attachments: true,
            attachment_folders: vec!["Assets".into(), "Files".into()],
            ..Settings::default()
        };
        let controls = controls(&settings);
        let names: Vec<&str> = controls.iter().map(|c| c.name).collect();
        assert_eq!(
            names,
            vec!["Hide attachments folders", "Open on startup", "Attachment folders", "Show Root navigation"]
        );
        assert_eq!(controls[0].value, ControlValue::Toggle(true));
        assert_eq!(controls[2].value, ControlValue::Text("Assets\nFiles".into()));
        assert_eq!(controls[3].value, ControlValue::Toggle(true));
    }

    #[test]
    fn test_parse_attachment_folders_trims_and_drops_blanks() {
        assert_eq!(
            parse_attachment_folders("  Assets \n\n\tFiles\n   \n"),
            vec!["Assets".to_string(), "Files".to_string()]
        );
        assert!(parse_attachment_folders("").is_empty());
    }

    #[test]
    fn test_apply_change_persists() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join(SETTINGS_FILE);
        let manager = SettingsManager::new(path.clone()).unwrap();

        assert!(apply_change(&manager, SettingChange::AttachmentFolders("Assets\n".into())).unwrap());
        assert!(apply_change(&manager, SettingChange::ShowRootNav(false)).unwrap());
        assert!(!apply_change(&manager, SettingChange::OpenOnStartup(true)).unwrap());

        let reloaded = SettingsManager::new(path).unwrap().get();
        assert_eq!(reloaded.attachment_folders, vec!["Assets".to_string()]);
        assert!(!reloaded.show_root_nav);
        assert!(reloaded.open_on_startup);
    }

    proptest! {
        #[test]
        fn prop_parsed_folders_are_trimmed_and_non_empty(text in "[ a-zA-Z\n\t]{0,40}") {
            for name in parse_attachment_folders(&text) {
                prop_assert!(!name.is_empty());
                prop_assert_eq!(name.trim(), name.as_str());
            }
        }
    }
}
