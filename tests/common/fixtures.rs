//! Test fixtures - reusable configuration and fragment text.

/// Fragment that records which script ran and with what values
pub const MARKER_FRAGMENT: &str = r#"log "branch={{ branch }}"
echo "{{ branch }}" > "{{ deploy_path }}/{{ marker }}"
"#;

/// Multi-server fragment that writes one marker per slot
pub const SLOT_FRAGMENT: &str = r#"log "slot={{ $self_deploy_server_key }}"
echo "{{ $self_deploy_server_key }}" > "{{ deploy_path }}/slot-{{ $self_deploy_server_key }}"
"#;

/// Body without placeholders
pub const PLAIN_FRAGMENT: &str = "log \"hello\"\n";
