use anyhow::{Context, bail};

/// One scripted input event, applied just before the given frame runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptEvent {
    pub frame: u64,
    pub action: ScriptAction,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptAction {
    KeyDown(String),
    KeyUp(String),
    /// Direct jump request, bypassing the key bindings.
    Jump,
}

/// Parse `"10:w+,40:w-,50:space+,80:jump"`. Entries are sorted by frame;
/// entries on the same frame keep their written order.
pub fn parse(script: &str) -> anyhow::Result<Vec<ScriptEvent>> {
    let mut events = Vec::new();
    for entry in script.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        let (frame, token) = entry
            .split_once(':')
            .with_context(|| format!("script entry {entry:?} is missing ':'"))?;
        let frame: u64 = frame
            .trim()
            .parse()
            .with_context(|| format!("bad frame number in {entry:?}"))?;
        events.push(ScriptEvent {
            frame,
            action: parse_action(token.trim())
                .with_context(|| format!("bad action in {entry:?}"))?,
        });
    }
    events.sort_by_key(|e| e.frame);
    Ok(events)
}

fn parse_action(token: &str) -> anyhow::Result<ScriptAction> {
    if token.eq_ignore_ascii_case("jump") {
        return Ok(ScriptAction::Jump);
    }
    let (key, down) = if let Some(key) = token.strip_suffix('+') {
        (key, true)
    } else if let Some(key) = token.strip_suffix('-') {
        (key, false)
    } else {
        bail!("expected `<key>+`, `<key>-` or `jump`, got {token:?}");
    };
    if key.is_empty() {
        bail!("empty key name");
    }
    let key = key_name(key);
    Ok(if down {
        ScriptAction::KeyDown(key)
    } else {
        ScriptAction::KeyUp(key)
    })
}

/// Host key id for a script key name. Only names that cannot be typed in a
/// script need a mapping.
fn key_name(name: &str) -> String {
    match name.to_lowercase().as_str() {
        "space" => " ".to_string(),
        "up" => "arrowup".to_string(),
        "down" => "arrowdown".to_string(),
        "left" => "arrowleft".to_string(),
        "right" => "arrowright".to_string(),
        other => other.to_string(),
    }
}
