use super::types::ChatMessage;

pub const RESTRUCTURE_SYSTEM_PROMPT: &str = "\
You are a text restructuring assistant. You rewrite raw text extracted from \
PDF documents into clear, properly formatted sentences while preserving the \
meaning. You never add commentary, headings, or explanations of your own.";

/// Build the restructuring request for one extracted chunk.
pub fn build_restructure_messages(chunk: &str) -> Vec<ChatMessage> {
    let user = format!(
        r#"The following text is extracted from a PDF and needs restructuring.

<text>
{chunk}
</text>

Restructure the text into clear, properly formatted sentences while preserving the meaning.
If the last sentence seems incomplete, leave it at the end so it can be continued in the next part.

Output only the structured text without extra explanation."#
    );

    vec![
        ChatMessage::system(RESTRUCTURE_SYSTEM_PROMPT),
        ChatMessage::user(user),
    ]
}

pub const QA_SYSTEM_PROMPT: &str = "\
You are a training-data generation assistant. You write question and answer \
pairs grounded strictly in the text you are given. Every answer must be \
supported by the text; you never invent facts.";

/// Build the Q&A generation request for one restructured chunk.
pub fn build_qa_messages(content: &str) -> Vec<ChatMessage> {
    let user = format!(
        r#"Generate all possible questions and answers based on the following text:

<text>
{content}
</text>

Format:
Q: <Generated Question>
A: <Generated Answer>

Output only the Q and A lines without extra text."#
    );

    vec![ChatMessage::system(QA_SYSTEM_PROMPT), ChatMessage::user(user)]
}
