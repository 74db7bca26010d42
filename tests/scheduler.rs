//! Exercises `Timeline` as a whole: the heap must resolve a first collision
//! while leaving an unrelated body untouched until its own predictions say
//! otherwise.
use glam::DVec2;
use stepless::{Body, Timeline};

fn ball(x: f64, y: f64, vx: f64, vy: f64, m: f64) -> Body {
    Body {
        x0: DVec2::new(x, y),
        v0: DVec2::new(vx, vy),
        a: DVec2::ZERO,
        r: 1.0,
        m,
        b: DVec2::new(1.0, 0.0),
    }
}

#[test]
fn resolves_near_pair_leaves_far_body_untouched_until_advance() {
    let mut timeline = Timeline::new(0.0);
    let near_a = timeline.add(ball(1.0, 0.0, -1.0, 0.0, 1.0));
    let near_b = timeline.add(ball(-1.0, 0.0, 1.0, 0.0, 1.0));
    let far = timeline.add(ball(1_000.0, 1_000.0, 0.0, 0.0, 1.0));

    let far_before = *timeline.get(far).unwrap();

    timeline.advance_to(100.0, false).unwrap();

    let far_after = *timeline.get(far).unwrap();
    assert_eq!(far_before, far_after, "an uninvolved body must not be perturbed");
    assert_eq!(timeline.t_now(), 100.0);

    // The near pair has collided and bounced apart.
    let a = timeline.get(near_a).unwrap();
    let b = timeline.get(near_b).unwrap();
    assert!((a.v_at(timeline.t_now()) - DVec2::new(1.0, 0.0)).length() < 1e-6);
    assert!((b.v_at(timeline.t_now()) - DVec2::new(-1.0, 0.0)).length() < 1e-6);
}

#[test]
fn view_edit_marks_body_modified_and_is_honored_on_advance() {
    let mut timeline = Timeline::new(0.0);
    let a = timeline.add(ball(10.0, 0.0, 0.0, 0.0, 1.0));
    let b = timeline.add(ball(-10.0, 0.0, 0.0, 0.0, 1.0));

    timeline.advance_to(1.0, false).unwrap();

    {
        let mut view = timeline.view_mut(a).unwrap();
        view.set_v(DVec2::new(-5.0, 0.0));
    }

    // Advancing should now schedule and resolve the collision this edit created.
    timeline.advance_to(10.0, false).unwrap();
    let body_a = timeline.get(a).unwrap();
    let body_b = timeline.get(b).unwrap();
    assert!(body_a.x_at(timeline.t_now()).x > body_b.x_at(timeline.t_now()).x);
}
