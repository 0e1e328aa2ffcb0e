use std::collections::BTreeMap;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Style, Stylize},
    widgets::{Block, BorderType, Borders, Clear, Padding, Row, Table, Widget},
};

use crate::{
    action::ActionState,
    config::{key_event_to_string, PageKeyBindings},
};

/// Key binding overlay. Keys bound to the same command share one row.
#[derive(Debug)]
pub struct Help {
    keybinding_groups: Vec<(String, Vec<(String, String)>)>,
    column_spacing: u16,
    margin_vertical: u16,
    margin_horizontal: u16,
}

impl Help {
    pub fn new(keybinding_groups: Vec<(String, PageKeyBindings)>) -> Self {
        let groups = keybinding_groups
            .into_iter()
            .map(|(group_name, keybindings)| {
                let mut by_command: BTreeMap<String, Vec<String>> = BTreeMap::new();
                for (event, action) in keybindings.0.iter().filter(|(_, action)| action.state == ActionState::Start) {
                    by_command.entry(action.command.string()).or_default().push(key_event_to_string(event));
                }
                let rows = by_command
                    .into_iter()
                    .map(|(command, mut keys)| {
                        keys.sort();
                        (keys.join(", "), command)
                    })
                    .collect();
                (group_name, rows)
            })
            .collect();

        Self { keybinding_groups: groups, column_spacing: 3, margin_vertical: 1, margin_horizontal: 2 }
    }

    pub fn groups(&self) -> &[(String, Vec<(String, String)>)] {
        &self.keybinding_groups
    }

    fn render_group(&self, area: Rect, buf: &mut Buffer, group_name: &str, keybindings: &[(String, String)]) {
        let rows: Vec<Row> = keybindings.iter().map(|(key, val)| Row::new(vec![key.clone(), val.clone()])).collect();
        let table = Table::new(rows, [Constraint::Fill(1), Constraint::Fill(1)])
            .column_spacing(self.column_spacing)
            .header(Row::new(vec!["Key", "Command"]).style(Style::new().bold()).bottom_margin(1))
            .block(
                Block::new()
                    .title(group_name.to_string())
                    .title_alignment(Alignment::Center)
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::new().bold().fg(Color::Cyan))
                    .padding(Padding::symmetric(self.margin_horizontal, self.margin_vertical)),
            );

        Clear.render(area, buf);
        Widget::render(table, area, buf);
    }
}

impl Widget for Help {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let column_width = |pick: fn(&(String, String)) -> usize| {
            self.keybinding_groups.iter().flat_map(|(_, rows)| rows.iter().map(pick)).max().unwrap_or(0) as u16
        };
        let key_length = column_width(|(key, _)| key.chars().count());
        let val_length = column_width(|(_, val)| val.chars().count());

        // columns + spacing + padding + border
        let width = key_length + val_length + self.column_spacing + self.margin_horizontal * 2 + 2;
        let heights = self.keybinding_groups.iter().map(|(_, rows)| {
            // rows + padding + header + border
            Constraint::Length(rows.len() as u16 + self.margin_vertical * 2 + 2 + 2)
        });

        let [area] = Layout::horizontal([Constraint::Length(width)]).flex(Flex::Center).areas(area);
        let areas = Layout::vertical(heights).flex(Flex::Center).split(area);

        for ((group_name, rows), area) in self.keybinding_groups.iter().zip(areas.iter()) {
            self.render_group(*area, buf, group_name, rows);
        }
    }
}
