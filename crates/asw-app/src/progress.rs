#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepStage {
    PreparingWorkspace,
    WritingCases,
    RunningSolver,
    ExtractingResults,
    SavingResults,
    Completed,
}

impl SweepStage {
    pub fn label(&self) -> &'static str {
        match self {
            SweepStage::PreparingWorkspace => "preparing workspace",
            SweepStage::WritingCases => "writing cases",
            SweepStage::RunningSolver => "running solver",
            SweepStage::ExtractingResults => "extracting results",
            SweepStage::SavingResults => "saving results",
            SweepStage::Completed => "completed",
        }
    }
}

#[derive(Debug, Clone)]
pub struct SweepProgressEvent {
    pub stage: SweepStage,
    pub elapsed_wall_s: f64,
    pub case_count: usize,
    pub message: Option<String>,
}
