// Minimal smoke run of the scheduling core, no files involved

use mathreel::{
    config::Config,
    render::{Op, PlanRecorder},
    scene::{SectionScheduler, VisualElementDispatcher},
    script::Script,
};

const LESSON: &str = r#"{
    "title": "Solving_Quadratics",
    "totalDuration": 90,
    "introduction": {"text": "Where do parabolas cross zero?", "duration": 10},
    "sections": [{
        "title": "The formula",
        "duration": 60,
        "visualSequence": [
            {"type": "math_equation", "content": "$$x = \\frac{-b \\pm \\sqrt{b^2-4ac}}{2a}$$", "timing": [0, 12]},
            {"type": "graph_plot", "content": "a parabola", "timing": [12, 24]},
            {"type": "step_by_step", "content": "Write a, b, c | Compute the discriminant | Take both roots", "timing": [24, 36]},
            {"type": "highlight_parts", "content": "ax^2 + bx + c = 0", "timing": [36, 44]},
            {"type": "math_equation", "content": "\\frac{1}{2", "timing": [44, 50]},
            {"type": "real_world_example", "content": "Projectile height over time", "timing": [50, 60]}
        ]
    }],
    "conclusion": {"text": "Two roots, one formula", "duration": 10}
}"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Testing mathreel core scheduling");

    // Test 1: Strategy registry
    println!("\n1. Strategies...");
    let dispatcher = VisualElementDispatcher::new();
    println!("   Available: {:?}", dispatcher.available_strategies());
    assert_eq!(dispatcher.len(), 6);

    // Test 2: Script parsing
    println!("\n2. Script...");
    let config = Config::default();
    let script = Script::from_json_str(LESSON, &config.defaults)?;
    println!("   '{}' with {} element(s)", script.display_title(), script.element_count());

    // Test 3: Scheduling
    println!("\n3. Scheduling...");
    let mut recorder = PlanRecorder::new();
    let report = SectionScheduler::new(&config).run(&script, &mut recorder);
    println!("   Nominal:   {:.1}s", report.nominal_duration);
    println!("   Scheduled: {:.1}s", report.scheduled_duration);
    println!("   Final pad: {:.1}s", report.final_pad);
    println!("   Fallbacks: {}", report.fallbacks);

    // Test 4: Timeline
    println!("\n4. Timeline...");
    for op in recorder.ops() {
        let what = match &op.op {
            Op::Play { animations } => format!("play x{}", animations.len()),
            Op::Wait => "wait".to_string(),
        };
        println!("   {:>6.2} - {:>6.2}  {}", op.start, op.end, what);
    }

    if report.fallbacks != 1 {
        return Err(format!("expected exactly one fallback, got {}", report.fallbacks).into());
    }

    println!("\nScheduling core is working.");
    Ok(())
}
