// Canaux lock-free entre l'UI et le moteur de lecture
// One bounded SPSC ring per message kind; a full ring rejects the push
// instead of blocking

use ringbuf::{HeapRb, traits::Split};

use crate::messaging::command::TransportCommand;
use crate::messaging::notification::Notification;

pub type Producer<T> = ringbuf::HeapProd<T>;
pub type Consumer<T> = ringbuf::HeapCons<T>;

/// Bounded single-producer single-consumer channel
pub fn bounded<T>(capacity: usize) -> (Producer<T>, Consumer<T>) {
    HeapRb::<T>::new(capacity).split()
}

pub type CommandProducer = Producer<TransportCommand>;
pub type CommandConsumer = Consumer<TransportCommand>;

/// UI → engine: transport commands
pub fn create_command_channel(capacity: usize) -> (CommandProducer, CommandConsumer) {
    bounded(capacity)
}

pub type NotificationProducer = Producer<Notification>;
pub type NotificationConsumer = Consumer<Notification>;

/// Engine → UI: user-facing notifications
pub fn create_notification_channel(
    capacity: usize,
) -> (NotificationProducer, NotificationConsumer) {
    bounded(capacity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ringbuf::traits::{Consumer as _, Producer as _};

    #[test]
    fn test_command_channel_round_trip() {
        let (mut tx, mut rx) = create_command_channel(8);

        tx.try_push(TransportCommand::Stop).unwrap();
        tx.try_push(TransportCommand::Skip).unwrap();

        assert_eq!(rx.try_pop(), Some(TransportCommand::Stop));
        assert_eq!(rx.try_pop(), Some(TransportCommand::Skip));
        assert_eq!(rx.try_pop(), None);
    }

    #[test]
    fn test_full_channel_rejects_push() {
        let (mut tx, _rx) = create_command_channel(1);

        tx.try_push(TransportCommand::Stop).unwrap();
        assert!(tx.try_push(TransportCommand::Stop).is_err());
    }

    #[test]
    fn test_bounded_works_for_any_payload() {
        let (mut tx, mut rx) = bounded::<u32>(4);

        for i in 0..4 {
            tx.try_push(i).unwrap();
        }
        assert!(tx.try_push(99).is_err());

        let drained: Vec<u32> = std::iter::from_fn(|| rx.try_pop()).collect();
        assert_eq!(drained, vec![0, 1, 2, 3]);
    }
}
