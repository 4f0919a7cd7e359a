use approx::assert_abs_diff_eq;
use polarcraft::{
    error::Error,
    light::angle::{PolarizerAngle, effective_angle},
    puzzle::{MemoryStore, PolarizerLock, UNLOCK_KEY, UnlockStore},
};
use uom::si::{angle::degree, f64::Angle};

#[test]
fn crossed_start_blocks_all_light() {
    let lock = PolarizerLock::default();

    assert_abs_diff_eq!(
        effective_angle(lock.first, lock.second).degrees(),
        90.0,
        epsilon = 1e-12
    );
    assert_abs_diff_eq!(lock.intensity().into_inner(), 0.0, epsilon = 1e-12);
}

#[test]
fn solving_the_lock() {
    let mut lock = PolarizerLock::default();
    let mut store = MemoryStore::new();

    assert!(matches!(
        lock.try_password("malus", &mut store),
        Err(Error::LockDark)
    ));

    // Drag the second polarizer back in steps until the sensor lights up.
    let mut steps = 0;
    while !lock.is_lit() {
        lock.rotate_second(Angle::new::<degree>(-5.0));
        steps += 1;
    }
    assert_eq!(steps, 16);
    assert_abs_diff_eq!(lock.second.folded().get::<degree>(), 55.0, epsilon = 1e-9);

    lock.set_second(PolarizerAngle::from_degrees(45.0));
    assert_abs_diff_eq!(lock.intensity().into_inner(), 1.0, epsilon = 1e-12);

    assert!(matches!(
        lock.try_password("stokes", &mut store),
        Err(Error::WrongPassword)
    ));
    assert!(!store.get(UNLOCK_KEY).unwrap());

    lock.try_password("malus", &mut store).unwrap();
    assert!(PolarizerLock::is_unlocked(&store).unwrap());
}
