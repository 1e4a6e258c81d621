pub const SYSTEM_INSTRUCTION: &str = "You are an expert at reading organizational charts and extracting company ownership structures. Always answer with valid JSON only, with consistent parent-child relationships.";

pub fn build_extraction_prompt(document_text: &str) -> String {
    format!(
        r#"Read the following organizational chart text and extract its company ownership structure.

SCHEMA:
Return a JSON array of objects with exactly these fields:
- id: integer, unique, sequential starting at 1
- name: company name (string, concise, at most 25 characters)
- parent: name of the owning company (string, "" for the top-level company)
- equity: ownership percentage held by the parent (string ending in %)

RULES:
- Every non-empty parent must exactly match the name of another company in the array
- Output ONLY the JSON array, no markdown, no explanations

EXAMPLE:
[
  {{"id": 1, "name": "Holding Company", "parent": "", "equity": "100%"}},
  {{"id": 2, "name": "Subsidiary A", "parent": "Holding Company", "equity": "75%"}},
  {{"id": 3, "name": "Subsidiary B", "parent": "Holding Company", "equity": "100%"}},
  {{"id": 4, "name": "Sub-subsidiary", "parent": "Subsidiary A", "equity": "50%"}}
]

TEXT:
{}

JSON OUTPUT:"#,
        document_text
    )
}
