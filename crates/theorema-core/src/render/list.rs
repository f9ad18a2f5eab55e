use super::html::kebab;
use super::RenderContext;
use crate::model::{ListContent, ListStyle, OrderedListStyle, UnorderedListStyle};

/// Marker text for the item at `index` (0-based) of a list.
///
/// `start_index` shifts ordered numbering and is ignored for unordered lists.
pub fn format_marker(style: ListStyle, start_index: Option<u32>, index: usize) -> String {
    match style {
        ListStyle::Ordered(ordered) => {
            let number = start_index.unwrap_or(1) as usize + index;
            let label = match ordered {
                OrderedListStyle::Decimal | OrderedListStyle::Unknown => number.to_string(),
                OrderedListStyle::AlphaLower => alpha(number),
                OrderedListStyle::AlphaUpper => alpha(number).to_uppercase(),
                OrderedListStyle::RomanLower => roman(number),
                OrderedListStyle::RomanUpper => roman(number).to_uppercase(),
            };
            format!("{label}.")
        }
        ListStyle::Unordered(unordered) => match unordered {
            UnorderedListStyle::Disc | UnorderedListStyle::Unknown => "\u{2022}",
            UnorderedListStyle::Circle => "\u{25E6}",
            UnorderedListStyle::Square => "\u{25AA}",
            UnorderedListStyle::None => "",
        }
        .to_string(),
    }
}

/// Bijective base-26: 1 -> a, 26 -> z, 27 -> aa.
fn alpha(mut number: usize) -> String {
    if number == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while number > 0 {
        number -= 1;
        out.push(b'a' + (number % 26) as u8);
        number /= 26;
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}

/// Lowercase roman numeral; numbers outside 1..=3999 fall back to decimal.
fn roman(mut number: usize) -> String {
    const NUMERALS: [(usize, &str); 13] = [
        (1000, "m"),
        (900, "cm"),
        (500, "d"),
        (400, "cd"),
        (100, "c"),
        (90, "xc"),
        (50, "l"),
        (40, "xl"),
        (10, "x"),
        (9, "ix"),
        (5, "v"),
        (4, "iv"),
        (1, "i"),
    ];
    if !(1..=3999).contains(&number) {
        return number.to_string();
    }
    let mut out = String::new();
    for (value, numeral) in NUMERALS {
        while number >= value {
            out.push_str(numeral);
            number -= value;
        }
    }
    out
}

impl<'a> RenderContext<'a> {
    pub(crate) fn render_list(&mut self, list: &'a ListContent) {
        let (tag, style_name) = match list.style {
            ListStyle::Ordered(style) => ("ol", kebab(&format!("{style:?}"))),
            ListStyle::Unordered(style) => ("ul", kebab(&format!("{style:?}"))),
        };
        let class = format!("list list-{style_name}");
        let start = list.start_index.map(|start| start.to_string());
        // Markers are rendered explicitly, so the native ones are switched off.
        let mut attrs = vec![("class", class.as_str()), ("style", "list-style: none")];
        if let (ListStyle::Ordered(_), Some(start)) = (list.style, start.as_deref()) {
            attrs.push(("start", start));
        }

        self.open(tag, &attrs);
        for (index, item) in list.items.iter().enumerate() {
            let marker = format_marker(list.style, list.start_index, index);
            self.open("li", &[]);
            self.element("span", &[("class", "list-marker")], &marker);
            self.render_nodes(&item.content);
            self.close("li");
        }
        self.close(tag);
    }
}
