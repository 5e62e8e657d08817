/// Grounding prompt for the answer engine. The contract is explicit:
/// answer ONLY from the supplied context, emit the fixed fallback when the
/// context does not contain the answer, never mention the context.
pub fn grounded_answer_prompt(domain: &str, context: &str, question: &str) -> String {
    format!(
        r#"You are an expert on {domain}. Answer the following question using ONLY the information in the context. If the answer is not in the context, say "I don't know".
Do not mention the context in your answer.

CONTEXT INFORMATION:
{context}

USER QUESTION:
{question}
"#
    )
}
