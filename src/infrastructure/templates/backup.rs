//! Scheduled backup script
//!
//! Invoked by cron as
//! `bash backup.sh <service> <mysql|postgres> <db name> <backup dir> <retention days>`.

pub const BACKUP_SCRIPT: &str = r#"#!/usr/bin/env bash
set -u

SERVICE_NAME="$1"
DB_TYPE="$2"
DB_NAME="$3"
BACKUP_DIR="$4"
RETENTION_PERIOD="${5:-0}"

CONTAINER="$(printf '%s' "$SERVICE_NAME" | tr -s '[:space:]' '-')-db"
TIMESTAMP="$(date +"%Y-%m-%dT%H-%M-%S")"
BACKUP_FILE="$BACKUP_DIR/dump-$SERVICE_NAME-$TIMESTAMP.sql"

mkdir -p "$BACKUP_DIR"
echo "Starting backup for service: $SERVICE_NAME"

case "$DB_TYPE" in
  mysql)
    docker exec "$CONTAINER" sh -c 'mysqldump -uroot -p"$MYSQL_ROOT_PASSWORD" "$1"' sh "$DB_NAME" > "$BACKUP_FILE"
    ;;
  postgres)
    docker exec "$CONTAINER" pg_dump -U postgres "$DB_NAME" > "$BACKUP_FILE"
    ;;
  *)
    echo "Error: unsupported database type: $DB_TYPE"
    exit 1
    ;;
esac

if [ $? -ne 0 ]; then
  echo "Error: backup failed for service: $SERVICE_NAME"
  rm -f "$BACKUP_FILE"
  exit 1
fi

if [ "$RETENTION_PERIOD" -gt 0 ]; then
  echo "Deleting backups older than $RETENTION_PERIOD days."
  find "$BACKUP_DIR" -type f ! -name cron-config.json -mtime +"$RETENTION_PERIOD" -exec rm -f {} \;
else
  echo "Retention period is 0. Skipping cleanup."
fi

echo "Backup completed for service: $SERVICE_NAME"
"#;
