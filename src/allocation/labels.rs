/// Label for the section at zero-based `index`: A..Z, then AA, AB, ...
pub fn section_label(index: usize) -> String {
    let mut label = Vec::new();
    let mut n = index + 1;
    while n > 0 {
        let rem = (n - 1) % 26;
        label.push(b'A' + rem as u8);
        n = (n - 1) / 26;
    }
    label.reverse();
    String::from_utf8(label).unwrap_or_default()
}

/// First `count` labels in allocation order
pub fn section_labels(count: usize) -> Vec<String> {
    (0..count).map(section_label).collect()
}
