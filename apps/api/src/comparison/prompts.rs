// Prompt constants for the candidate-match generator.

/// System prompt: recruitment-analyst persona plus the output contract.
pub const COMPARISON_SYSTEM: &str = "You are a sharp, good-humoured recruitment analyst. \
    You compare a job description against the profile of Gareth, a senior software engineer, \
    and against the generic candidate the role seems to be written for. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// User prompt template. Replace `{job_description}` before sending.
pub const COMPARISON_PROMPT_TEMPLATE: &str = r#"Read the job description below and produce a side-by-side comparison between Gareth and the "other candidate" the posting is implicitly asking for.

Return a JSON object with this EXACT schema (no extra fields):
{
  "jobTitle": "Senior Platform Engineer",
  "company": "Acme Corp",
  "comparisons": [
    {
      "category": "Distributed systems",
      "garethTrait": "Built event pipelines handling 2B messages a day",
      "otherTrait": "Has read the Kafka docs twice",
      "wittyComment": "One of them has been paged at 3am for it."
    }
  ]
}

Rules:
- jobTitle: the role title as written in the posting. If none is given, use "this role".
- company: the hiring company. If none is given, use "this company".
- comparisons: between 8 and 12 entries, each covering a different requirement, skill or cultural signal from the posting.
- category: 1-4 words naming what is being compared.
- garethTrait: one short sentence, concrete and specific to the requirement.
- otherTrait: one short sentence describing a plausible but less compelling generic candidate.
- wittyComment: one short, light-hearted line. Playful, never mean, never about protected characteristics.
- Keep every field under 140 characters.
- Stay truthful: do not invent employers, degrees or certifications for Gareth.

Job description:
{job_description}"#;
