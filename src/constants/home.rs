pub const TITLE_TEXT: &str = r#"
 ___ _
| __| |__ _ _ __ _ __ _  _
| _|| / _` | '_ \ '_ \ || |
|_| |_\__,_| .__/ .__/\_, |
           |_|  |_|   |__/
"#;

pub const SUBTITLE_TEXT: &str = "a terminal side scroller";

/// Logo bob amplitude in rows.
pub const LOGO_BOB_ROWS: i16 = 1;
/// Frames per logo bob step.
pub const LOGO_BOB_PERIOD: u64 = 24;

pub const BIRD_FRAMES: [&str; 3] = [
    r#"
  __
<(o )___
 ( ._> /
  `---'
"#,
    r#"
  __
<(o )_^_
 ( ._> /
  `---'
"#,
    r#"
  __
<(o )___
 ( ._> v
  `---'
"#,
];
