//! Goal library: три типовые параметризованные goal structures для
//! тестирования 3D SUT.
//!
//! - `entity_in_close_range(e, epsilon)` - подойти к сущности `e` на `epsilon`
//! - `entity_interacted(e)` - подойти на interaction distance и провзаимодействовать
//! - `entity_invariant_checked(agent, e, p)` - подойти и проверить `p(e)`,
//!   результат пишется как pass/fail verdict в log агента
//!
//! Каждый вызов строит новую независимую структуру, общих mutable данных нет.

use crate::agent::TestAgent;
use crate::belief::{AgentBeliefState, WorldEntity};
use crate::goal::{seq, Evaluation, Goal, GoalStructure};
use crate::tactic::library::{abort, explore, first_of, interact, navigate_to_entity, observe};
use crate::verdict::VerdictEvent;


/// Дистанция, с которой SUT разрешает interact
pub const INTERACTION_DISTANCE: f32 = 0.5;

/// Дистанция, достаточная чтобы наблюдать состояние сущности
pub const OBSERVATION_DISTANCE: f32 = 1.0;

fn within_range(belief: &AgentBeliefState, entity_id: &str, epsilon: f32) -> bool {
    belief.distance_to(entity_id).is_some_and(|distance| distance <= epsilon)
}

/// Агент должен оказаться не дальше `epsilon` от сущности.
///
/// Пока сущность не в belief, goal просто не выполнен (agent исследует мир).
/// Tactic: navigate → explore → abort (goal проваливается, когда идей больше нет).
pub fn entity_in_close_range(entity_id: &str, epsilon: f32) -> GoalStructure {
    let target = entity_id.to_string();

    Goal::new(format!("This entity is closeby: {}", entity_id))
        .to_solve(move |belief: &AgentBeliefState| within_range(belief, &target, epsilon))
        .with_tactic(first_of([navigate_to_entity(entity_id), explore(), abort()]))
        .lift()
}

/// Подойти на `INTERACTION_DISTANCE` и провзаимодействовать
pub fn entity_interacted(entity_id: &str) -> GoalStructure {
    entity_interacted_within(entity_id, INTERACTION_DISTANCE)
}

/// То же, что `entity_interacted`, но interaction distance задаёт вызывающий
pub fn entity_interacted_within(entity_id: &str, interaction_distance: f32) -> GoalStructure {
    // решать нечего, goal существует ради tactic
    let interaction = Goal::new(format!("This entity is interacted: [{}]", entity_id))
        .evaluated(Evaluation::AfterAction)
        .to_solve(|_| true)
        .with_tactic(first_of([interact(entity_id), abort()]));

    seq([entity_in_close_range(entity_id, interaction_distance), interaction.lift()])
}

/// Подойти на `OBSERVATION_DISTANCE` и проверить `predicate` на сущности.
///
/// Ровно один verdict `"Object-check <id>"` на проверку: pass если сущность
/// есть и predicate выполнен, иначе fail. Отсутствие сущности и ложный
/// predicate намеренно не различаются.
pub fn entity_invariant_checked<P>(agent: &TestAgent, entity_id: &str, predicate: P) -> GoalStructure
where
    P: Fn(&WorldEntity) -> bool + Send + Sync + 'static,
{
    let target = entity_id.to_string();
    let label = format!("Object-check {}", entity_id);

    let checking = Goal::test_goal(format!("Invariant check {}", entity_id))
        .to_solve(|_| true)
        .invariant(&agent.verdicts(), move |belief: &AgentBeliefState| {
            let passed = belief.get_entity(&target).is_some_and(|entity| predicate(entity));
            VerdictEvent::new(label.clone(), "", passed)
        })
        .with_tactic(first_of([observe(), abort()]));

    seq([entity_in_close_range(entity_id, OBSERVATION_DISTANCE), checking.lift()])
}
