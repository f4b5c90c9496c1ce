//! Fixed instructions sent with the uploaded study material.

const SUMMARY_PROMPT: &str = "Analyze all the uploaded images carefully. These contain study material from a student.

Please provide a comprehensive, detailed summary of all the content shown in these images.
Include:
- Main topics and concepts covered
- Key points and important facts
- Definitions and formulas if any
- Any diagrams or visual information explained

Make the summary clear, organized, and helpful for exam preparation.";

const QUESTION_PAPER_PROMPT: &str = "Analyze all the uploaded images carefully. These contain study material from a student.

Based on this content, create a comprehensive Question Paper with a total of 100 marks.

Format the question paper as follows:
- Divide questions into sections (Short Answer, Long Answer, etc.)
- Include a mix of question types
- Clearly mention marks for each question
- Questions should cover all important topics from the images
- Make questions exam-style and clear

Total marks must add up to exactly 100 marks.";

/// What the student asked the model to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StudyTask {
    Summary,
    QuestionPaper,
}

impl StudyTask {
    pub fn prompt(self) -> &'static str {
        match self {
            StudyTask::Summary => SUMMARY_PROMPT,
            StudyTask::QuestionPaper => QUESTION_PAPER_PROMPT,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StudyTask::Summary => "summary",
            StudyTask::QuestionPaper => "questions",
        }
    }
}
