/// QA-pair generation prompt: up to `max_pairs` non-duplicating questions
/// spanning three difficulty tiers, each answerable solely from the page.
pub fn qa_generation_prompt(domain: &str, page_text: &str, max_pairs: usize) -> String {
    format!(
        r#"You are an expert assistant in LLM evaluation (in the {domain} area).
Given the following context, generate up to {max_pairs} question(s) and their answer(s) based ONLY on the information in the context.

REQUIREMENTS:
1. Generate diverse, non-duplicating questions that cover different aspects of the context
2. Mix difficulty levels:
   - Easy: Direct factual questions that can be answered word-for-word from the context
   - Medium: Questions requiring understanding and paraphrasing of concepts
   - Hard: Questions requiring inference, analysis, or connecting multiple pieces of information
3. Ensure each question tests different knowledge areas from the context
4. Avoid repetitive question patterns or similar phrasings
5. Make questions specific and answerable only from the given context
6. Include questions that test both explicit information and implicit understanding

Return a JSON object of the form: {{"qa_pairs": [{{"question": "...", "answer": "..."}}]}}

CONTEXT: {page_text}
"#
    )
}

/// Judge prompt. The scoring policy is the definition of "correct" for this
/// system's quality measurement: coverage of the reference's core content is
/// checked first, completeness and accuracy outrank brevity, and accurate
/// extra context is never penalized.
pub fn judge_prompt(
    domain: &str,
    question: &str,
    candidate_answer: &str,
    reference_answer: &str,
) -> String {
    format!(
        r#"You are an expert assistant in LLM evaluation (in the {domain} area).
Compare the LLM answer to the reference answer and score similarity (0=not at all, 5=perfect).

SCORING GUIDELINES:
- PRIORITY: Check if the LLM answer contains or covers the key content from the expected answer first
- If the LLM answer goes beyond the scope but still covers all key context from the expected answer, it MUST receive a high score (4-5)
- Focus on content accuracy and completeness rather than exact matching
- More detailed/comprehensive answers that include the expected content should score higher, not lower
- Only use "Completely Wrong" if the answer is factually incorrect or completely unrelated

EVALUATION STEPS:
1. First identify if the LLM answer contains the core content from the reference answer
2. Then assess if additional information is accurate and relevant
3. Score based on completeness and accuracy, not brevity

REASON CATEGORIES:
- "Completely Wrong" - Answer is factually incorrect or completely unrelated to the question
- "Partially Missing" - Answer is partially correct but missing key information from reference
- "Too Verbose" - Answer includes correct info but adds unnecessary or irrelevant details
- "Accurate" - Answer is accurate and complete
- "Comprehensive" - Answer covers reference content plus additional accurate context

Provide a brief reason using one of these categories plus a short description.
Example: "Comprehensive - covers expected answer plus relevant additional context"

Return a JSON object of the form: {{"score": <integer 0-5>, "reason": "<category - short description>"}}

QUESTION: {question}
LLM ANSWER: {candidate_answer}
REFERENCE ANSWER: {reference_answer}
"#
    )
}
