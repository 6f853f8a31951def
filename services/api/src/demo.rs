use crate::infra::{InMemorySubmissionRepository, StaticUserProvider};
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;
use transparency_ai::config::AppConfig;
use transparency_ai::error::AppError;
use transparency_ai::workflows::transparency::{
    provider_from_config, AnsweredQuestionnaire, BaseField, InputKind, ProductDraft, QuestionSpec,
    ScoreResult, SubmissionRequest, SubmissionService, SubmitterProfile, TransparencyProvider,
};

#[derive(Args, Debug)]
pub(crate) struct QuestionsArgs {
    /// Product category label, e.g. "Food & Beverages". Unknown labels use the generic template.
    #[arg(long)]
    pub(crate) category: String,
    /// Ingredient list; mentioning "organic" adds the certification question.
    #[arg(long, default_value = "")]
    pub(crate) ingredients: String,
    /// Product name forwarded to the scoring service.
    #[arg(long, default_value = "Untitled product")]
    pub(crate) product_name: String,
    /// Print the questionnaire as JSON instead of a listing.
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// JSON file holding `{ "draft": {...}, "answers": {...} }`.
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Print the score result as JSON.
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Leave the optional questions unanswered to show the advisory path.
    #[arg(long)]
    pub(crate) sparse: bool,
}

fn configured_provider() -> Result<Arc<dyn TransparencyProvider>, AppError> {
    let config = AppConfig::load()?;
    Ok(provider_from_config(&config.scoring)?)
}

pub(crate) async fn run_questions(args: QuestionsArgs) -> Result<(), AppError> {
    let QuestionsArgs {
        category,
        ingredients,
        product_name,
        json,
    } = args;

    let draft =
        ProductDraft::new(product_name, category).with_field(BaseField::Ingredients, ingredients);
    let provider = configured_provider()?;
    let questions = provider.generate_questions(&draft).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&questions)?);
    } else {
        println!(
            "Questionnaire for {} ({}) via {}",
            draft.product_name,
            draft.category(),
            provider.describe()
        );
        render_questions(&questions);
    }
    Ok(())
}

pub(crate) async fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let raw = std::fs::read_to_string(&args.input)?;
    let request: SubmissionRequest = serde_json::from_str(&raw)?;
    let provider = configured_provider()?;
    let result = provider
        .compute_score(&request.draft, &request.answers)
        .await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!(
            "{} ({})",
            request.draft.product_name,
            request.draft.category()
        );
        render_score(&result);
    }
    Ok(())
}

pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let provider = configured_provider()?;
    let repository = Arc::new(InMemorySubmissionRepository::default());
    let users = Arc::new(StaticUserProvider::signed_in(demo_submitter()));
    let service = SubmissionService::new(provider, repository, users);

    println!("Transparency questionnaire demo");
    let draft = demo_draft();
    let questionnaire = service.questionnaire(&draft).await?;
    println!(
        "\n{} ({}) via {}",
        draft.product_name, questionnaire.category, questionnaire.provider
    );
    render_questions(&questionnaire.questions);

    let answers = demo_answers(&questionnaire.questions, args.sparse);
    println!("\nAnswered {} of {} questions", answers.len(), questionnaire.questions.len());

    let submission = service
        .submit(SubmissionRequest {
            draft,
            answers,
            questions: Some(questionnaire.questions),
        })
        .await?;

    println!("\nSubmission {} is {}", submission.id, submission.status.label());
    if let Some(result) = &submission.score {
        render_score(result);
    }

    let stored = service.get(&submission.id)?;
    match serde_json::to_string_pretty(&stored.status_view()) {
        Ok(json) => println!("\nPublic status payload:\n{}", json),
        Err(err) => println!("\nPublic status payload unavailable: {}", err),
    }
    Ok(())
}

fn demo_draft() -> ProductDraft {
    ProductDraft::new("Organic Green Tea", "Food & Beverages")
        .with_field(BaseField::Brand, "Leafy Co")
        .with_field(
            BaseField::Description,
            "First-flush sencha steamed within hours of picking and packed in nitrogen-flushed tins.",
        )
        .with_field(BaseField::Ingredients, "Organic green tea leaves")
        .with_field(
            BaseField::Sourcing,
            "Two family estates in Shizuoka, each visited twice a year by our buyers.",
        )
        .with_field(
            BaseField::Manufacturing,
            "Steamed, rolled and dried on the estate, then blended and packed in Hamburg.",
        )
        .with_field(
            BaseField::Certifications,
            "EU Organic (DE-ÖKO-006) and JAS Organic, renewed annually after inspection.",
        )
}

fn demo_submitter() -> SubmitterProfile {
    SubmitterProfile {
        id: "demo-user".to_string(),
        email: "quality@leafy.example".to_string(),
        company: "Leafy Co".to_string(),
    }
}

/// Picks a plausible answer per question; optional ones are skipped when `sparse`.
fn demo_answers(questions: &[QuestionSpec], sparse: bool) -> AnsweredQuestionnaire {
    questions
        .iter()
        .filter(|question| question.required || !sparse)
        .filter_map(|question| {
            let answer = match question.input_kind {
                InputKind::SingleSelect => question.options.first()?.clone(),
                InputKind::ShortText | InputKind::LongText => demo_text(&question.id).to_string(),
            };
            Some((question.id.clone(), answer))
        })
        .collect()
}

fn demo_text(id: &str) -> &'static str {
    match id {
        "nutritional_info" => "Per 2 g serving: 0 kcal, 0 g fat, 0 g sugar, 25 mg caffeine, 60 mg catechins.",
        "preservatives" => "None. Freshness comes from nitrogen flushing and light-proof tins.",
        "allergen_testing" => "Packed on a dedicated tea-only line; swab tested for gluten and nuts every quarter.",
        "organic_certification" => "Certified by DE-ÖKO-006 since 2019; annual on-site inspection of both estates.",
        "social_responsibility" => "Fixed premium paid to estate workers and a school meal programme in Kakegawa.",
        _ => "Documented in our supplier handbook and available on request.",
    }
}

fn render_questions(questions: &[QuestionSpec]) {
    for (position, question) in questions.iter().enumerate() {
        let marker = if question.required { "*" } else { " " };
        println!(
            "{:>2}.{} [{}] {}",
            position + 1,
            marker,
            question.id,
            question.prompt
        );
        if !question.options.is_empty() {
            println!("      options: {}", question.options.join(" | "));
        }
    }
    println!("    (* required)");
}

fn render_score(result: &ScoreResult) {
    println!(
        "Transparency score: {}/100 ({} of {} points)",
        result.score, result.raw_points, result.max_points
    );
    println!("Insights");
    for insight in &result.insights {
        println!("- {}", insight);
    }
}
