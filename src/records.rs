use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Record {
    fields: Vec<(String, String)>,
}

impl Record {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(key, _)| *key == name) {
            Some(slot) => slot.1 = value,
            None => self.fields.push((name, value)),
        }
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(key, _)| key.as_str())
    }
}

impl<K, V> FromIterator<(K, V)> for Record
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Record::default();
        for (key, value) in iter {
            record.insert(key, value);
        }
        record
    }
}

#[derive(Debug, Clone, Default)]
pub struct ParsedTable {
    pub header: Vec<String>,
    pub records: Vec<Record>,
}

pub fn parse_records(text: &str) -> Vec<Record> {
    parse_table(text).records
}

pub fn parse_table(text: &str) -> ParsedTable {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return ParsedTable::default();
    }

    let mut lines = trimmed.split('\n').map(strip_carriage_return);
    let header = lines.next().map(split_line).unwrap_or_default();

    let records = lines
        .map(|line| {
            header
                .iter()
                .zip(split_line(line))
                .map(|(name, value)| (name.clone(), value))
                .collect::<Record>()
        })
        .collect();

    ParsedTable { header, records }
}

fn strip_carriage_return(line: &str) -> &str {
    line.strip_suffix('\r').unwrap_or(line)
}

// Quoted fields may not span lines; the document is split on newlines first.
pub fn split_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            _ => current.push(ch),
        }
    }

    fields.push(current);
    fields
}
